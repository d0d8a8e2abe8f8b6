//! Error conversion utilities for CLI.
//!
//! Converts untgz-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance. The original error
//! stays in the chain so structured output can still report its code.

use anyhow::Result;
use std::io;
use std::path::Path;
use untgz_core::ExtractionError;

/// Converts `ExtractionError` to a user-friendly anyhow error with context.
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    let message = match &err {
        ExtractionError::ArchiveNotFound { path, .. } => format!(
            "Cannot read archive '{}'\n\
             HINT: Check that the file exists and is readable.",
            path.display()
        ),
        ExtractionError::DestinationNotWritable { path, .. } => format!(
            "Cannot extract '{}' into '{}'\n\
             HINT: The destination must be a directory you can read and write.",
            archive.display(),
            path.display()
        ),
        ExtractionError::CorruptArchive { reason, .. } => format!(
            "Corrupt archive '{}': {reason}\n\
             HINT: The download may be incomplete. Fetch the package again.",
            archive.display()
        ),
        ExtractionError::PathTraversalRejected { path, reason } => format!(
            "Security violation: Archive '{}' has an entry escaping the destination: '{}' ({reason})\n\
             HINT: This archive may be malicious. Nothing outside the destination was written.",
            archive.display(),
            path.display()
        ),
        ExtractionError::Io(io_err) => {
            let hint = match io_err.kind() {
                io::ErrorKind::AlreadyExists | io::ErrorKind::NotADirectory => {
                    "Use --replace-conflicting-files if a stale file is in the way of a directory."
                }
                io::ErrorKind::StorageFull => "Free some disk space and try again.",
                io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                    "Check permissions on the destination directory."
                }
                _ => "Check the destination filesystem and try again.",
            };
            format!(
                "I/O error while extracting '{}'\n\
                 HINT: {hint}",
                archive.display()
            )
        }
    };

    anyhow::Error::new(err).context(message)
}

/// Adds archive path context to extraction errors
pub fn add_archive_context<T>(result: Result<T, ExtractionError>, archive: &Path) -> Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}

/// Finds the core error code anywhere in the chain.
pub fn error_code(error: &anyhow::Error) -> Option<&'static str> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ExtractionError>())
        .map(ExtractionError::code)
}

//! Error types for package extraction.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while extracting a `.tgz` package.
///
/// Every extraction call fails with exactly one of these. None of them are
/// retried internally.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The source archive does not exist or cannot be read.
    #[error("archive not found or unreadable: {path}")]
    ArchiveNotFound {
        /// Archive path as supplied by the caller.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The destination directory cannot be created or is not readable and
    /// writable.
    #[error("destination not writable: {path}")]
    DestinationNotWritable {
        /// Destination path as supplied by the caller.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Gzip or tar framing is invalid.
    #[error("corrupt archive: {reason}")]
    CorruptArchive {
        /// What was wrong with the archive.
        reason: String,
        /// Underlying decoder failure, when there is one.
        #[source]
        source: Option<io::Error>,
    },

    /// An entry name would resolve outside the destination directory.
    #[error("path traversal rejected: {path} ({reason})")]
    PathTraversalRejected {
        /// Entry name exactly as stored in the archive.
        path: PathBuf,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// Any other read or write failure while streaming.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExtractionError {
    /// Creates a `CorruptArchive` error without an underlying cause.
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptArchive {
            reason: reason.into(),
            source: None,
        }
    }

    /// Classifies an I/O error raised while pulling bytes through the gzip
    /// and tar decoders.
    ///
    /// `flate2` and `tar` report framing problems (bad magic, checksum
    /// mismatch, truncated stream, unparseable header fields) with the
    /// `InvalidInput`, `InvalidData`, `UnexpectedEof` and `Other` kinds.
    /// Those become `CorruptArchive`; everything else stays `Io`.
    pub fn from_decode(context: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::Other => Self::CorruptArchive {
                reason: format!("{context}: {err}"),
                source: Some(err),
            },
            _ => Self::Io(err),
        }
    }

    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use untgz_core::ExtractionError;
    ///
    /// let err = ExtractionError::PathTraversalRejected {
    ///     path: PathBuf::from("../etc/passwd"),
    ///     reason: "escapes destination",
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::corrupt("bad header");
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversalRejected { .. })
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use untgz_core::ExtractionError;
    ///
    /// let err = ExtractionError::corrupt("bad header");
    /// assert_eq!(err.context(), Some("bad header"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::CorruptArchive { reason, .. } => Some(reason),
            Self::PathTraversalRejected { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Stable identifier for machine consumers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ArchiveNotFound { .. } => "ARCHIVE_NOT_FOUND",
            Self::DestinationNotWritable { .. } => "DESTINATION_NOT_WRITABLE",
            Self::CorruptArchive { .. } => "CORRUPT_ARCHIVE",
            Self::PathTraversalRejected { .. } => "PATH_TRAVERSAL_REJECTED",
            Self::Io(_) => "IO_FAILURE",
        }
    }
}

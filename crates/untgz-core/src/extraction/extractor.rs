//! Streaming extractor for `.tgz` packages.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::config::DirectoryConflict;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::formats::ArchiveEntry;
use crate::formats::GzipDecoder;
use crate::formats::TarReader;
use crate::io::ByteSource;
use crate::security;
use crate::types::DestDir;
use crate::types::EntryKind;
use crate::types::SafePath;

use super::journal::Journal;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Extracts `.tgz` packages into a destination directory.
///
/// Entries are processed strictly in archive order on the calling thread.
/// Regular files and directories are written; every other entry kind is
/// skipped without error. A single rejected or corrupt entry fails the
/// whole call.
///
/// # Examples
///
/// ```no_run
/// use untgz_core::ExtractionConfig;
/// use untgz_core::extraction::Extractor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = Extractor::new(ExtractionConfig::default());
/// let report = extractor.extract("left-pad-1.3.0.tgz".as_ref(), "/tmp/left-pad".as_ref())?;
/// println!("package at {}", report.package_root().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    /// Creates an extractor with the given configuration.
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts `archive` into `dest`.
    ///
    /// The archive is opened before the destination is touched, so a
    /// missing archive never creates `dest`. With `verify_before_write`
    /// the whole archive is decoded and every entry name resolved before
    /// the first write.
    ///
    /// # Errors
    ///
    /// - `ArchiveNotFound` if the archive cannot be opened
    /// - `DestinationNotWritable` if `dest` cannot be prepared
    /// - `CorruptArchive` on invalid gzip or tar framing
    /// - `PathTraversalRejected` if any entry, or the configured package
    ///   directory, resolves outside `dest`
    /// - `Io` for any other read or write failure
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(archive = %archive.display(), dest = %dest.display())
    )]
    pub fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractionReport> {
        let start = Instant::now();

        let source = ByteSource::open(archive)?;
        let missing = if self.config.cleanup_on_failure {
            missing_ancestors(dest)
        } else {
            Vec::new()
        };
        let dest = DestDir::prepare(dest)?;

        let mut journal = Journal::new(self.config.cleanup_on_failure);
        for dir in missing {
            journal.record_dir(dir);
        }

        match self.run(archive, source, &dest, &mut journal) {
            Ok(mut report) => {
                report.duration = start.elapsed();
                tracing::info!(
                    files = report.files_extracted,
                    directories = report.directories_created,
                    skipped = report.entries_skipped,
                    bytes = report.bytes_written,
                    "extraction complete"
                );
                Ok(report)
            }
            Err(err) => {
                if self.config.cleanup_on_failure {
                    let recorded = journal.len();
                    let outcome = journal.rollback();
                    tracing::warn!(
                        error = %err,
                        recorded,
                        removed = outcome.removed,
                        left_behind = outcome.left_behind,
                        "extraction failed, rolled back"
                    );
                }
                Err(err)
            }
        }
    }

    fn run(
        &self,
        archive: &Path,
        mut source: ByteSource,
        dest: &DestDir,
        journal: &mut Journal,
    ) -> Result<ExtractionReport> {
        let package_root = security::resolve(dest, Path::new(&self.config.package_dir))?;

        if self.config.verify_before_write {
            let entries = verify_archive(source, dest)?;
            tracing::debug!(entries, "archive verified");
            source = ByteSource::open(archive)?;
        }

        let mut report = ExtractionReport::new(package_root.into_path_buf());
        self.write_archive(source, dest, journal, &mut report)?;
        Ok(report)
    }

    fn write_archive(
        &self,
        source: ByteSource,
        dest: &DestDir,
        journal: &mut Journal,
        report: &mut ExtractionReport,
    ) -> Result<()> {
        let mut reader = TarReader::new(GzipDecoder::new(source)?);
        let mut buffer = CopyBuffer::new();

        for entry in reader.entries()? {
            let mut entry = entry?;
            let safe = security::resolve(dest, entry.name())?;
            check_target(&entry, &safe)?;

            match entry.kind() {
                EntryKind::Directory => {
                    self.ensure_dir(dest, safe.relative(), journal, report)?;
                }
                EntryKind::RegularFile => {
                    self.write_file(&mut entry, &safe, dest, journal, report, &mut buffer)?;
                }
                kind @ EntryKind::Other(_) => {
                    tracing::debug!(
                        entry = %entry.name().display(),
                        kind = kind.name(),
                        "skipping entry"
                    );
                    report.entries_skipped += 1;
                }
            }
        }

        let decoder = reader.finish()?;
        report.archive_bytes_read = decoder.get_ref().bytes_read();
        Ok(())
    }

    fn write_file<R: Read>(
        &self,
        entry: &mut ArchiveEntry<'_, R>,
        safe: &SafePath,
        dest: &DestDir,
        journal: &mut Journal,
        report: &mut ExtractionReport,
        buffer: &mut CopyBuffer,
    ) -> Result<()> {
        if let Some(parent) = safe.relative().parent() {
            self.ensure_dir(dest, parent, journal, report)?;
        }

        let path = safe.as_path();
        let existed = match fs::symlink_metadata(path) {
            Ok(metadata) if metadata.is_symlink() => {
                fs::remove_file(path)?;
                false
            }
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };

        let file = File::create(path)?;
        if !existed {
            journal.record_file(path.to_path_buf());
        }

        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
        let written = copy_with_buffer(entry, &mut writer, buffer)?;
        writer.flush()?;
        entry.ensure_complete()?;

        report.files_extracted += 1;
        report.bytes_written = report
            .bytes_written
            .checked_add(written)
            .ok_or_else(|| ExtractionError::corrupt("total payload size overflows u64"))?;

        tracing::debug!(path = %safe.relative().display(), bytes = written, "wrote file");
        Ok(())
    }

    /// Creates `relative` under `dest` one component at a time, applying the
    /// directory conflict policy to anything in the way.
    fn ensure_dir(
        &self,
        dest: &DestDir,
        relative: &Path,
        journal: &mut Journal,
        report: &mut ExtractionReport,
    ) -> Result<()> {
        let mut current = dest.as_path().to_path_buf();

        for component in relative.components() {
            current.push(component);

            match fs::symlink_metadata(&current) {
                Ok(metadata) if metadata.is_dir() => continue,
                // Resolution already proved any symlink here stays inside.
                Ok(metadata) if metadata.is_symlink() && current.is_dir() => continue,
                Ok(_) => self.clear_conflict(&current)?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }

            match fs::create_dir(&current) {
                Ok(()) => {
                    journal.record_dir(current.clone());
                    report.directories_created += 1;
                    tracing::debug!(path = %current.display(), "created directory");
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && current.is_dir() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    fn clear_conflict(&self, path: &Path) -> Result<()> {
        match self.config.directory_conflict {
            DirectoryConflict::Fail => Err(ExtractionError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "cannot create directory {}: a non-directory is in the way",
                    path.display()
                ),
            ))),
            DirectoryConflict::ReplaceFile => {
                tracing::debug!(path = %path.display(), "replacing file with directory");
                fs::remove_file(path)?;
                Ok(())
            }
        }
    }
}

/// Ancestors of `path`, itself included, that do not exist yet. Outermost
/// first.
fn missing_ancestors(path: &Path) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = path
        .ancestors()
        .take_while(|ancestor| {
            !ancestor.as_os_str().is_empty()
                && matches!(
                    ancestor.symlink_metadata(),
                    Err(e) if e.kind() == io::ErrorKind::NotFound
                )
        })
        .map(Path::to_path_buf)
        .collect();
    missing.reverse();
    missing
}

/// Rejects a regular file whose name resolves to the destination itself.
fn check_target<R: Read>(entry: &ArchiveEntry<'_, R>, safe: &SafePath) -> Result<()> {
    if entry.kind().is_file() && safe.is_root() {
        return Err(ExtractionError::corrupt(format!(
            "file entry {} resolves to the destination root",
            entry.name().display()
        )));
    }
    Ok(())
}

/// Read-only pass over the whole archive: framing, checksums, payload
/// lengths, the gzip trailer and every entry name.
///
/// Returns the number of entries.
fn verify_archive(source: ByteSource, dest: &DestDir) -> Result<usize> {
    let mut reader = TarReader::new(GzipDecoder::new(source)?);
    let mut count = 0;

    for entry in reader.entries()? {
        let mut entry = entry?;
        let safe = security::resolve(dest, entry.name())?;
        check_target(&entry, &safe)?;

        io::copy(&mut entry, &mut io::sink())
            .map_err(|e| ExtractionError::from_decode("reading entry payload", e))?;
        entry.ensure_complete()?;
        count += 1;
    }

    reader.finish()?;
    Ok(count)
}

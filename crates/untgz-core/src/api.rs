//! High-level public API for package extraction.

use std::path::Path;

use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::Extractor;
use crate::extraction::extract_async;

/// Extracts a `.tgz` package with the default configuration.
///
/// The destination (and any missing ancestors) is created if needed. On
/// success the report carries the canonical path of
/// `<dest>/package`, whether or not the archive contained that directory.
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be opened (`ArchiveNotFound`)
/// - The destination cannot be created or written (`DestinationNotWritable`)
/// - The gzip or tar framing is invalid (`CorruptArchive`)
/// - An entry would land outside the destination (`PathTraversalRejected`)
/// - Any other I/O operation fails (`Io`)
///
/// # Examples
///
/// ```no_run
/// use untgz_core::extract_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_package("left-pad-1.3.0.tgz", "/tmp/left-pad")?;
/// println!("Extracted {} files", report.files_extracted);
/// println!("Package root: {}", report.package_root().display());
/// # Ok(())
/// # }
/// ```
pub fn extract_package<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
) -> Result<ExtractionReport> {
    extract_package_with_config(archive_path, output_dir, &ExtractionConfig::default())
}

/// Extracts a `.tgz` package with an explicit configuration.
///
/// # Errors
///
/// Same as [`extract_package`].
///
/// # Examples
///
/// ```no_run
/// use untgz_core::ExtractionConfig;
/// use untgz_core::extract_package_with_config;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractionConfig::strict();
/// let report = extract_package_with_config("pkg.tgz", "/tmp/pkg", &config)?;
/// # Ok(())
/// # }
/// ```
pub fn extract_package_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    Extractor::new(config.clone()).extract(archive_path.as_ref(), output_dir.as_ref())
}

/// Extracts a `.tgz` package without blocking the calling task.
///
/// The work runs on tokio's blocking pool and the future resolves exactly
/// once with the same result [`extract_package_with_config`] would return.
///
/// # Errors
///
/// Same as [`extract_package`]. A failed worker is reported as `Io`.
///
/// # Examples
///
/// ```no_run
/// use untgz_core::ExtractionConfig;
/// use untgz_core::extract_package_async;
///
/// # async fn run() -> Result<(), untgz_core::ExtractionError> {
/// let report = extract_package_async("pkg.tgz", "/tmp/pkg", ExtractionConfig::default()).await?;
/// println!("{}", report.package_root().display());
/// # Ok(())
/// # }
/// ```
pub async fn extract_package_async<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_async(
        Extractor::new(config),
        archive_path.as_ref().to_path_buf(),
        output_dir.as_ref().to_path_buf(),
    )
    .await
}

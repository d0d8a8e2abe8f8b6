//! Extraction operation reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a successful extraction.
///
/// `package_root` is the canonical path of `<destination>/<package_dir>`.
/// It is returned whether or not the archive contained that directory.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Canonical path of the package subdirectory.
    pub package_root: PathBuf,

    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directories created, implicit parents included.
    pub directories_created: usize,

    /// Number of entries skipped because of their kind (symlinks, devices).
    pub entries_skipped: usize,

    /// Total payload bytes written to disk.
    pub bytes_written: u64,

    /// Compressed bytes read from the archive during the writing pass.
    pub archive_bytes_read: u64,

    /// Duration of the whole operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates an empty report for the given package root.
    #[must_use]
    pub fn new(package_root: PathBuf) -> Self {
        Self {
            package_root,
            ..Self::default()
        }
    }

    /// Returns the package root path.
    #[must_use]
    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    /// Returns total number of entries written or created.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

#[cfg(test)]
#[allow(clippy::field_reassign_with_default)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ExtractionReport::new(PathBuf::from("/tmp/out/package"));
        assert_eq!(report.package_root(), Path::new("/tmp/out/package"));
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.bytes_written, 0);
    }

    #[test]
    fn test_total_items() {
        let mut report = ExtractionReport::default();
        report.files_extracted = 10;
        report.directories_created = 5;
        report.entries_skipped = 2;
        assert_eq!(report.total_items(), 15);
    }
}

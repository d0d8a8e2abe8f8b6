//! Raw archive byte source.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use super::CountingReader;
use crate::ExtractionError;
use crate::Result;

/// Read buffer size for the archive file (64KB).
const SOURCE_BUFFER_SIZE: usize = 64 * 1024;

/// Sequential, forward-only byte stream over an archive file.
///
/// The file handle is owned by the source and released when it is dropped,
/// on every exit path of an extraction.
pub struct ByteSource {
    inner: BufReader<CountingReader<File>>,
}

impl ByteSource {
    /// Opens the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveNotFound` if the path does not exist, cannot be
    /// opened for reading, or is a directory.
    pub fn open(path: &Path) -> Result<Self> {
        let not_found = |source: io::Error| ExtractionError::ArchiveNotFound {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(not_found)?;
        let metadata = file.metadata().map_err(not_found)?;
        if metadata.is_dir() {
            return Err(not_found(io::Error::new(
                io::ErrorKind::InvalidInput,
                "archive path is a directory",
            )));
        }

        Ok(Self {
            inner: BufReader::with_capacity(SOURCE_BUFFER_SIZE, CountingReader::new(file)),
        })
    }

    /// Returns the number of raw bytes pulled from the file so far.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.inner.get_ref().total_bytes()
    }
}

impl Read for ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for ByteSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = ByteSource::open(&temp.path().join("missing.tgz"));
        assert!(matches!(
            result,
            Err(ExtractionError::ArchiveNotFound { .. })
        ));
    }

    #[test]
    fn test_open_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = ByteSource::open(temp.path());
        assert!(matches!(
            result,
            Err(ExtractionError::ArchiveNotFound { .. })
        ));
    }

    #[test]
    fn test_read_counts_bytes() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("data.bin");
        fs::write(&path, [7u8; 1000]).unwrap();

        let mut source = ByteSource::open(&path).unwrap();
        let mut out = Vec::new();
        source.read_to_end(&mut out).unwrap();
        assert_eq!(out.len(), 1000);
        assert_eq!(source.bytes_read(), 1000);
    }
}

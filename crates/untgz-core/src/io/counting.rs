//! Counting reader for tracking bytes consumed.
//!
//! This module provides a `CountingReader` that wraps any `Read`
//! implementation and tracks the total number of bytes read from it.

use std::io::Read;

/// Wrapper reader that tracks total bytes read.
///
/// Used underneath the gzip decoder to report how many compressed bytes an
/// extraction consumed.
///
/// # Implementation Notes
///
/// The counter only increments on successful reads. A read that fails does
/// not change the count.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use untgz_core::io::CountingReader;
///
/// let mut reader = CountingReader::new(&b"Hello, World!"[..]);
/// let mut out = String::new();
/// reader.read_to_string(&mut out)?;
///
/// assert_eq!(reader.total_bytes(), 13);
/// assert_eq!(out, "Hello, World!");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct CountingReader<R> {
    /// Inner reader being wrapped
    inner: R,
    /// Total bytes successfully read
    bytes_read: u64,
}

impl<R> CountingReader<R> {
    /// Creates a new counting reader.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    /// Returns the total number of bytes successfully read.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.bytes_read
    }

    /// Consumes the counting reader and returns the inner reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Returns a reference to the inner reader.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let bytes = self.inner.read(buf)?;
        self.bytes_read += bytes as u64;
        Ok(bytes)
    }
}

//! Buffered copy of entry payloads into files.
//!
//! Provides a reusable copy buffer so extracting many small files does not
//! allocate per entry, and keeps the two failure sides apart: a read error
//! comes from the decoders and is classified as archive corruption, a write
//! error is a plain I/O failure.

use std::io;
use std::io::Read;
use std::io::Write;

use crate::ExtractionError;

/// Buffer size for I/O operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Heap buffer reused across every entry of one extraction.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies an entry payload from `reader` to `writer` using `buffer`.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if:
/// - Reading fails. Decoder failures (truncation, CRC mismatch, invalid
///   data) become `CorruptArchive`, anything else `Io`
/// - Writing to the destination fails (`Io`)
/// - The byte count would overflow u64 (`CorruptArchive`)
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use untgz_core::copy::CopyBuffer;
/// use untgz_core::copy::copy_with_buffer;
///
/// # fn main() -> Result<(), untgz_core::ExtractionError> {
/// let mut buffer = CopyBuffer::new();
/// let mut input = Cursor::new(b"payload".to_vec());
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// assert_eq!(copied, 7);
/// # Ok(())
/// # }
/// ```
#[inline]
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, ExtractionError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractionError::from_decode("reading entry payload", e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(ExtractionError::Io)?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or_else(|| ExtractionError::corrupt("entry payload size overflows u64"))?;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_buffer_new() {
        let buffer = CopyBuffer::new();
        assert_eq!(buffer.size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        let result = copy_with_buffer(&mut input, &mut output, &mut buffer);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 0);
        assert_eq!(output.len(), 0);
    }

    #[test]
    fn test_copy_small_data() {
        let mut buffer = CopyBuffer::new();
        let input_data = b"Hello, World!";
        let mut input = Cursor::new(input_data);
        let mut output = Vec::new();

        let result = copy_with_buffer(&mut input, &mut output, &mut buffer);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_large_data() {
        let mut buffer = CopyBuffer::new();
        // Create 1MB of data
        let input_data = vec![0x42u8; 1024 * 1024];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();

        let result = copy_with_buffer(&mut input, &mut output, &mut buffer);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_multiple_chunks() {
        let mut buffer = CopyBuffer::new();
        // Create data larger than buffer size
        let input_data = vec![0x55u8; COPY_BUFFER_SIZE * 3 + 1000];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();

        let result = copy_with_buffer(&mut input, &mut output, &mut buffer);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_with_interrupted_reads() {
        use std::io::Error;
        use std::io::ErrorKind;

        // Mock reader that simulates interrupted reads
        struct InterruptedReader {
            data: Vec<u8>,
            position: usize,
            interrupt_count: usize,
        }

        impl Read for InterruptedReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.interrupt_count.is_multiple_of(3) && self.position < self.data.len() {
                    self.interrupt_count += 1;
                    return Err(Error::new(ErrorKind::Interrupted, "interrupted"));
                }

                self.interrupt_count += 1;

                if self.position >= self.data.len() {
                    return Ok(0); // EOF
                }

                let remaining = self.data.len() - self.position;
                let to_read = remaining.min(buf.len());
                buf[..to_read].copy_from_slice(&self.data[self.position..self.position + to_read]);
                self.position += to_read;
                Ok(to_read)
            }
        }

        let test_data = vec![0x42u8; 1000];
        let mut reader = InterruptedReader {
            data: test_data.clone(),
            position: 0,
            interrupt_count: 0,
        };

        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();

        let result = copy_with_buffer(&mut reader, &mut output, &mut buffer);
        assert!(result.is_ok(), "copy should handle interrupted reads");
        assert_eq!(
            output, test_data,
            "data should be copied correctly despite interruptions"
        );
    }

    // Edge case: Test write failure propagation
    #[test]
    fn test_copy_with_write_failure() {
        use std::io::Error;
        use std::io::ErrorKind;

        // Mock writer that fails after a certain number of bytes
        struct FailingWriter {
            written: usize,
            fail_after: usize,
        }

        impl Write for FailingWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                if self.written >= self.fail_after {
                    return Err(Error::other("write failed"));
                }
                let to_write = (self.fail_after - self.written).min(buf.len());
                self.written += to_write;
                Ok(to_write)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let test_data = vec![0x42u8; 1000];
        let mut input = Cursor::new(test_data);
        let mut writer = FailingWriter {
            written: 0,
            fail_after: 500,
        };

        let mut buffer = CopyBuffer::new();
        let result = copy_with_buffer(&mut input, &mut writer, &mut buffer);

        assert!(result.is_err(), "copy should propagate write errors");
        match result {
            Err(ExtractionError::Io(e)) => {
                assert_eq!(e.kind(), ErrorKind::Other);
            }
            _ => panic!("expected IO error"),
        }
    }

    #[test]
    fn test_copy_truncated_source_is_corrupt() {
        struct TruncatedReader {
            sent: bool,
        }

        impl Read for TruncatedReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.sent {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "unexpected end of file",
                    ));
                }
                self.sent = true;
                buf[..4].copy_from_slice(b"part");
                Ok(4)
            }
        }

        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();
        let result = copy_with_buffer(&mut TruncatedReader { sent: false }, &mut output, &mut buffer);

        assert!(matches!(
            result,
            Err(ExtractionError::CorruptArchive { .. })
        ));
        assert_eq!(output, b"part");
    }

    #[test]
    fn test_copy_read_permission_error_stays_io() {
        struct DeniedReader;

        impl Read for DeniedReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                ))
            }
        }

        let mut buffer = CopyBuffer::new();
        let result = copy_with_buffer(&mut DeniedReader, &mut Vec::new(), &mut buffer);
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }
}

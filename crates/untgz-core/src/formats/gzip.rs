//! Gzip container decoding.

use std::io;
use std::io::BufRead;
use std::io::Read;

use flate2::bufread::GzDecoder;

use crate::ExtractionError;
use crate::Result;

/// Gzip magic bytes: `1F 8B`.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// The only compression method defined by RFC 1952 (DEFLATE).
const GZIP_METHOD_DEFLATE: u8 = 0x08;

/// Decompressed view of a gzip stream.
///
/// The header magic and compression method are checked eagerly in
/// [`GzipDecoder::new`]; DEFLATE data is inflated lazily as the consumer
/// reads. The CRC32 and length trailer are verified by `flate2` once the
/// stream is exhausted, and a truncated body surfaces as an
/// `UnexpectedEof` read error.
pub struct GzipDecoder<R: BufRead> {
    inner: GzDecoder<R>,
}

impl<R: BufRead> GzipDecoder<R> {
    /// Wraps a buffered reader after validating the gzip header prefix.
    ///
    /// # Errors
    ///
    /// Returns `CorruptArchive` if the stream is empty, does not start with
    /// the gzip magic, or declares a method other than DEFLATE.
    pub fn new(mut reader: R) -> Result<Self> {
        check_header(&mut reader)?;
        Ok(Self {
            inner: GzDecoder::new(reader),
        })
    }

    /// Returns a reference to the compressed reader.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Consumes the decoder and returns the compressed reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R: BufRead> Read for GzipDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Peeks at the first three bytes without consuming them.
fn check_header<R: BufRead>(reader: &mut R) -> Result<()> {
    let available = reader
        .fill_buf()
        .map_err(|e| ExtractionError::from_decode("reading gzip header", e))?;
    let mut prefix = [0u8; 3];
    let filled = available.len().min(prefix.len());
    prefix[..filled].copy_from_slice(&available[..filled]);

    if filled == 0 {
        return Err(ExtractionError::corrupt("archive is empty"));
    }
    if filled < prefix.len() || prefix[..2] != GZIP_MAGIC {
        return Err(ExtractionError::corrupt("missing gzip magic bytes"));
    }
    if prefix[2] != GZIP_METHOD_DEFLATE {
        return Err(ExtractionError::corrupt(format!(
            "unsupported gzip compression method {:#04x}",
            prefix[2]
        )));
    }

    Ok(())
}

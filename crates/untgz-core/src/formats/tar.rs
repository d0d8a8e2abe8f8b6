//! Tar stream reader.
//!
//! Block-level parsing is delegated to the `tar` crate, which handles the
//! POSIX ustar name prefix, GNU long names and pax extended headers,
//! verifies every header checksum, and skips unread payload plus padding
//! when the next entry is requested. This module narrows its output to the
//! [`ArchiveEntry`] shape the extractor works with and classifies failures.

use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;
use crate::types::EntryKind;

/// Lazy, forward-only reader over the entries of a tar stream.
///
/// The sequence is not restartable: [`TarReader::entries`] can be called
/// once per reader.
pub struct TarReader<R: Read> {
    archive: tar::Archive<R>,
}

impl<R: Read> TarReader<R> {
    /// Creates a reader over a decompressed tar stream.
    #[must_use]
    pub fn new(reader: R) -> Self {
        let mut archive = tar::Archive::new(reader);
        // A zero block ends the archive; anything after it is ignored.
        archive.set_ignore_zeros(false);
        Self { archive }
    }

    /// Returns the entry iterator.
    ///
    /// # Errors
    ///
    /// Returns `CorruptArchive` if iteration was already started.
    pub fn entries(&mut self) -> Result<Entries<'_, R>> {
        let inner = self
            .archive
            .entries()
            .map_err(|e| ExtractionError::from_decode("opening tar stream", e))?;
        Ok(Entries { inner, done: false })
    }

    /// Drains whatever follows the end-of-archive marker and returns the
    /// underlying reader.
    ///
    /// Draining pulls the rest of the compressed stream through the gzip
    /// decoder so its CRC32 and length trailer are verified even though the
    /// tar layer stopped reading early.
    ///
    /// # Errors
    ///
    /// Returns `CorruptArchive` if the trailing data cannot be decoded.
    pub fn finish(self) -> Result<R> {
        let mut inner = self.archive.into_inner();
        io::copy(&mut inner, &mut io::sink())
            .map_err(|e| ExtractionError::from_decode("reading archive trailer", e))?;
        Ok(inner)
    }
}

/// Iterator over [`ArchiveEntry`] values.
///
/// Stops after the first error.
pub struct Entries<'a, R: 'a + Read> {
    inner: tar::Entries<'a, R>,
    done: bool,
}

impl<'a, R: Read> Iterator for Entries<'a, R> {
    type Item = Result<ArchiveEntry<'a, R>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = match self.inner.next()? {
            Ok(entry) => ArchiveEntry::from_tar(entry),
            Err(e) => Err(ExtractionError::from_decode("reading tar header", e)),
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// One entry of the archive: header fields plus a payload stream scoped to
/// the entry's extent.
///
/// The name is passed through exactly as stored and must be treated as
/// untrusted. Reading the payload is optional; whatever is left unread is
/// skipped when the next entry is requested.
pub struct ArchiveEntry<'a, R: 'a + Read> {
    name: PathBuf,
    kind: EntryKind,
    size: u64,
    consumed: u64,
    payload: tar::Entry<'a, R>,
}

impl<'a, R: Read> ArchiveEntry<'a, R> {
    fn from_tar(entry: tar::Entry<'a, R>) -> Result<Self> {
        let size = entry
            .header()
            .entry_size()
            .map_err(|e| ExtractionError::from_decode("reading entry size", e))?;
        let kind = EntryKind::from_tar(entry.header().entry_type(), &entry.path_bytes(), size);
        let name = entry
            .path()
            .map_err(|e| ExtractionError::from_decode("decoding entry name", e))?
            .into_owned();

        Ok(Self {
            name,
            kind,
            size,
            consumed: 0,
            payload: entry,
        })
    }

    /// Entry name as stored in the archive.
    #[must_use]
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Entry kind.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Declared payload size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Fails if the payload ended before its declared size.
    ///
    /// # Errors
    ///
    /// Returns `CorruptArchive` when fewer than `size` bytes could be read.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.consumed < self.size {
            return Err(ExtractionError::corrupt(format!(
                "entry {} truncated: {} of {} bytes",
                self.name.display(),
                self.consumed,
                self.size
            )));
        }
        Ok(())
    }
}

impl<R: Read> Read for ArchiveEntry<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.payload.read(buf)?;
        self.consumed += n as u64;
        Ok(n)
    }
}

//! Test utilities for building `.tgz` fixtures.
//!
//! This module provides reusable helpers for creating in-memory test
//! archives, including entries with names that well-behaved tar writers
//! refuse to produce (`../evil`, `/etc/passwd`).
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Gzip-compresses a byte buffer.
#[must_use]
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Creates an in-memory `.tgz` archive from a list of regular files.
///
/// # Examples
///
/// ```
/// use untgz_core::test_utils::create_test_tgz;
///
/// let tgz = create_test_tgz(vec![("package/test.txt", b"testing")]);
/// assert_eq!(&tgz[..2], &[0x1f, 0x8b]);
/// ```
#[must_use]
pub fn create_test_tgz(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(TarTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build_tgz()
}

/// Builder for tar test archives with various entry types.
///
/// # Examples
///
/// ```
/// use untgz_core::test_utils::TarTestBuilder;
///
/// let tgz = TarTestBuilder::new()
///     .add_directory("package/")
///     .add_file("package/index.js", b"content")
///     .add_symlink("package/link", "index.js")
///     .build_tgz();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new tar test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file. Names over 100 bytes get a GNU long name entry.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a regular file with a POSIX ustar header, splitting long names
    /// into the prefix field.
    #[must_use]
    pub fn add_ustar_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_ustar();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a hardlink.
    #[must_use]
    pub fn add_hardlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Link);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a regular file whose name bytes are written verbatim into the
    /// header, bypassing the path checks of `tar::Builder`.
    ///
    /// The name must fit the 100-byte name field.
    #[must_use]
    pub fn add_raw_file(self, name: &[u8], data: &[u8]) -> Self {
        self.add_raw_entry(name, tar::EntryType::Regular, data)
    }

    /// Adds a directory whose name bytes are written verbatim.
    #[must_use]
    pub fn add_raw_directory(self, name: &[u8]) -> Self {
        self.add_raw_entry(name, tar::EntryType::Directory, &[])
    }

    /// Adds a symlink whose name bytes are written verbatim.
    #[must_use]
    pub fn add_raw_symlink(self, name: &[u8], target: &str) -> Self {
        self.add_raw_entry_with(name, tar::EntryType::Symlink, &[], |header| {
            header.set_link_name(target).unwrap();
        })
    }

    fn add_raw_entry(self, name: &[u8], kind: tar::EntryType, data: &[u8]) -> Self {
        self.add_raw_entry_with(name, kind, data, |_| {})
    }

    fn add_raw_entry_with(
        mut self,
        name: &[u8],
        kind: tar::EntryType,
        data: &[u8],
        customize: impl FnOnce(&mut tar::Header),
    ) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(if kind.is_dir() { 0o755 } else { 0o644 });
        header.set_entry_type(kind);
        let field = &mut header.as_old_mut().name;
        assert!(name.len() <= field.len(), "raw name too long");
        field.fill(0);
        field[..name.len()].copy_from_slice(name);
        customize(&mut header);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Adds a regular file whose size field holds `raw_size` verbatim.
    #[must_use]
    pub fn add_file_with_raw_size(mut self, path: &str, raw_size: [u8; 12]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_mode(0o644);
        header.as_old_mut().size = raw_size;
        header.set_cksum();
        self.builder.append(&header, std::io::empty()).unwrap();
        self
    }

    /// Builds and returns the uncompressed tar data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    /// Builds the archive and gzip-compresses it.
    #[must_use]
    pub fn build_tgz(self) -> Vec<u8> {
        gzip(&self.build())
    }

    /// Builds the compressed archive and writes it to `path`.
    pub fn write_tgz(self, path: &Path) {
        std::fs::write(path, self.build_tgz()).unwrap();
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_tgz() {
        let tgz = create_test_tgz(vec![("package/file.txt", b"hello")]);
        assert_eq!(&tgz[..3], &[0x1f, 0x8b, 0x08]);
    }

    #[test]
    fn test_tar_builder() {
        let tar_data = TarTestBuilder::new()
            .add_file("file.txt", b"content")
            .add_directory("dir/")
            .build();
        assert!(!tar_data.is_empty());
        assert_eq!(tar_data.len() % 512, 0);
    }

    #[test]
    fn test_raw_name_written_verbatim() {
        let tar_data = TarTestBuilder::new()
            .add_raw_file(b"../escape.txt", b"x")
            .build();
        assert_eq!(&tar_data[..13], b"../escape.txt");
        assert_eq!(tar_data[13], 0);
    }
}

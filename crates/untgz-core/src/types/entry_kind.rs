//! Archive entry kind classification.

/// Kind of a tar entry, as far as extraction is concerned.
///
/// Extraction writes `RegularFile` and `Directory` entries. Every other kind
/// (symlinks, hardlinks, devices, FIFOs) is reported as `Other` and skipped
/// without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file with a byte payload.
    RegularFile,
    /// Directory.
    Directory,
    /// Anything else. The raw tar type flag byte is kept for diagnostics.
    Other(u8),
}

impl EntryKind {
    /// Classifies a tar header type.
    ///
    /// A regular file whose name ends with `/` and has no payload is a
    /// directory written by pre-POSIX tar implementations.
    ///
    /// # Examples
    ///
    /// ```
    /// use untgz_core::EntryKind;
    ///
    /// assert_eq!(
    ///     EntryKind::from_tar(tar::EntryType::Regular, b"package/index.js", 12),
    ///     EntryKind::RegularFile
    /// );
    /// assert_eq!(
    ///     EntryKind::from_tar(tar::EntryType::Regular, b"package/lib/", 0),
    ///     EntryKind::Directory
    /// );
    /// assert_eq!(
    ///     EntryKind::from_tar(tar::EntryType::Symlink, b"package/link", 0),
    ///     EntryKind::Other(b'2')
    /// );
    /// ```
    #[must_use]
    pub fn from_tar(entry_type: tar::EntryType, name: &[u8], size: u64) -> Self {
        match entry_type {
            tar::EntryType::Directory => Self::Directory,
            tar::EntryType::Regular | tar::EntryType::Continuous => {
                if size == 0 && name.ends_with(b"/") {
                    Self::Directory
                } else {
                    Self::RegularFile
                }
            }
            other => Self::Other(other.as_byte()),
        }
    }

    /// Returns `true` for regular files.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::RegularFile)
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Short human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegularFile => "file",
            Self::Directory => "directory",
            Self::Other(b'1') => "hardlink",
            Self::Other(b'2') => "symlink",
            Self::Other(b'3' | b'4') => "device",
            Self::Other(b'6') => "fifo",
            Self::Other(_) => "other",
        }
    }
}

//! Package listing types.

use std::path::PathBuf;

use crate::types::EntryKind;

/// One entry of a listed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Entry name exactly as stored in the archive (untrusted).
    pub name: PathBuf,

    /// Entry kind.
    pub kind: EntryKind,

    /// Declared payload size in bytes.
    pub size: u64,
}

/// Every entry of a package, in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Entries in archive order.
    pub entries: Vec<ManifestEntry>,

    /// Sum of regular file sizes.
    pub total_size: u64,

    /// Compressed size of the archive in bytes.
    pub archive_size: u64,
}

impl ArchiveManifest {
    pub(crate) fn add_entry(&mut self, entry: ManifestEntry) {
        if entry.kind.is_file() {
            self.total_size = self.total_size.saturating_add(entry.size);
        }
        self.entries.push(entry);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of regular files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.kind.is_file()).count()
    }

    /// Number of directories.
    #[must_use]
    pub fn dir_count(&self) -> usize {
        self.entries.iter().filter(|e| e.kind.is_dir()).count()
    }
}

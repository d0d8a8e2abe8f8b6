//! Type-safe wrappers for extraction.
//!
//! The path types can only be obtained through validation: a [`DestDir`]
//! from [`DestDir::prepare`] and a [`SafePath`] from [`SafePath::resolve`].
//! Code that writes to the filesystem takes these types, never raw paths.

pub mod dest_dir;
pub mod entry_kind;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use entry_kind::EntryKind;
pub use safe_path::SafePath;

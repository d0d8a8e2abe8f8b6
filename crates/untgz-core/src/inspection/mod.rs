//! Package inspection without extraction.
//!
//! # Examples
//!
//! ```no_run
//! use untgz_core::list_package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = list_package("left-pad-1.3.0.tgz")?;
//! for entry in &manifest.entries {
//!     println!("{} {}", entry.kind.name(), entry.name.display());
//! }
//! # Ok(())
//! # }
//! ```

mod list;
mod manifest;

pub use list::list_package;
pub use manifest::ArchiveManifest;
pub use manifest::ManifestEntry;

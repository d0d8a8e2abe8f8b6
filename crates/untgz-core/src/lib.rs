//! Streaming, path-safe extraction of gzip-compressed tar packages.
//!
//! `untgz-core` extracts `.tgz` packages (the format used by npm-style
//! package registries) into a destination directory. The archive is read
//! as a stream: bytes flow from the file through a gzip decoder and a tar
//! reader straight into the files being written, without holding the
//! whole package in memory.
//!
//! Every entry name is resolved against the destination before anything
//! is written. Names that are empty, absolute, or climb out of the
//! destination fail the whole extraction.
//!
//! # Examples
//!
//! ```no_run
//! use untgz_core::extract_package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_package("left-pad-1.3.0.tgz", "/tmp/left-pad")?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod io;
pub mod report;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract_package;
pub use api::extract_package_async;
pub use api::extract_package_with_config;
pub use config::DirectoryConflict;
pub use config::ExtractionConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use inspection::ArchiveManifest;
pub use inspection::ManifestEntry;
pub use inspection::list_package;
pub use report::ExtractionReport;

pub use types::DestDir;
pub use types::EntryKind;
pub use types::SafePath;

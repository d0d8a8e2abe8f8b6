//! Stream decoders for `.tgz` archives.
//!
//! [`GzipDecoder`] turns the compressed byte stream into the tar stream,
//! [`TarReader`] turns the tar stream into [`ArchiveEntry`] values.

pub mod gzip;
pub mod tar;

pub use gzip::GzipDecoder;
pub use tar::ArchiveEntry;
pub use tar::Entries;
pub use tar::TarReader;

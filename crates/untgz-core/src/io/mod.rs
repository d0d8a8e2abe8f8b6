//! I/O utilities for reading archives.

mod counting;
mod source;

pub use counting::CountingReader;
pub use source::ByteSource;

//! Extraction orchestration.
//!
//! [`Extractor`] drives ByteSource → GzipDecoder → TarReader → PathSanitizer
//! → filesystem for one archive. [`extract_async`] runs the same operation
//! on the blocking worker pool.

mod extractor;
mod journal;
mod task;

pub use extractor::Extractor;
pub use task::extract_async;

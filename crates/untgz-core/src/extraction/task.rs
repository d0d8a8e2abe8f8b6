//! Asynchronous extraction entry point.

use std::io;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;

use super::Extractor;

/// Runs an extraction on tokio's blocking worker pool.
///
/// The caller's task is never blocked by file or decompression I/O. The
/// returned future resolves exactly once. There is no cancellation: dropping
/// the future detaches the worker, which still runs to completion.
///
/// # Errors
///
/// Returns whatever [`Extractor::extract`] returns. A worker that panicked
/// or was shut down is reported as `Io`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub async fn extract_async(
    extractor: Extractor,
    archive: PathBuf,
    dest: PathBuf,
) -> Result<ExtractionReport> {
    tokio::task::spawn_blocking(move || extractor.extract(&archive, &dest))
        .await
        .map_err(|e| {
            ExtractionError::Io(io::Error::other(format!("extraction worker failed: {e}")))
        })?
}

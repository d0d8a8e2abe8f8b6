//! Package listing implementation.

use std::path::Path;

use crate::Result;
use crate::formats::GzipDecoder;
use crate::formats::TarReader;
use crate::io::ByteSource;

use super::ArchiveManifest;
use super::ManifestEntry;

/// Lists the entries of a `.tgz` package without writing anything.
///
/// Payloads are skipped, not read, but the stream is still decoded to the
/// end so the gzip trailer is verified. Names are reported as stored; no
/// sanitization is applied.
///
/// # Errors
///
/// Returns `ArchiveNotFound` if the archive cannot be opened and
/// `CorruptArchive` on invalid gzip or tar framing.
#[tracing::instrument(level = "debug", skip_all, fields(archive = %archive.as_ref().display()))]
pub fn list_package<P: AsRef<Path>>(archive: P) -> Result<ArchiveManifest> {
    let source = ByteSource::open(archive.as_ref())?;
    let mut reader = TarReader::new(GzipDecoder::new(source)?);
    let mut manifest = ArchiveManifest::default();

    for entry in reader.entries()? {
        let entry = entry?;
        manifest.add_entry(ManifestEntry {
            name: entry.name().to_path_buf(),
            kind: entry.kind(),
            size: entry.size(),
        });
    }

    let decoder = reader.finish()?;
    manifest.archive_size = decoder.get_ref().bytes_read();
    Ok(manifest)
}

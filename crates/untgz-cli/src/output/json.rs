//! JSON output formatter for machine-readable results.

use super::formatter::JsonError;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error::error_code;
use anyhow::Result;
use serde::Serialize;
use std::io;
use std::io::Write;
use untgz_core::ArchiveManifest;
use untgz_core::ExtractionReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ManifestEntryOutput {
    name: String,
    kind: &'static str,
    size: u64,
}

#[derive(Serialize)]
struct ManifestOutput {
    entries: Vec<ManifestEntryOutput>,
    total_entries: usize,
    total_size: u64,
    archive_size: u64,
}

impl From<&ArchiveManifest> for ManifestOutput {
    fn from(manifest: &ArchiveManifest) -> Self {
        Self {
            entries: manifest
                .entries
                .iter()
                .map(|entry| ManifestEntryOutput {
                    name: entry.name.display().to_string(),
                    kind: entry.kind.name(),
                    size: entry.size,
                })
                .collect(),
            total_entries: manifest.len(),
            total_size: manifest.total_size,
            archive_size: manifest.archive_size,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            package_root: String,
            files_extracted: usize,
            directories_created: usize,
            entries_skipped: usize,
            bytes_written: u64,
            archive_bytes_read: u64,
            duration_ms: u128,
        }

        let data = ExtractionOutput {
            package_root: report.package_root().display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            archive_bytes_read: report.archive_bytes_read,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::from(manifest)))
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, _human_readable: bool) -> Result<()> {
        self.format_manifest_short(manifest)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(
            operation,
            JsonError {
                code: error_code(error),
                message: format!("{error:#}"),
            },
        );
        let _ = Self::output(&output);
    }
}

//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use untgz_core::ArchiveManifest;
use untgz_core::ExtractionReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()>;

    /// Format entry names only
    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()>;

    /// Format entries with kind and size
    fn format_manifest_long(&self, manifest: &ArchiveManifest, human_readable: bool) -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct JsonError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub message: String,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: JsonError) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope() {
        let output = JsonOutput::error(
            "extract",
            JsonError {
                code: Some("CORRUPT_ARCHIVE"),
                message: "bad".to_string(),
            },
        );
        let value: serde_json::Value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["operation"], "extract");
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], "CORRUPT_ARCHIVE");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let output = JsonOutput::success("list", vec![1, 2]);
        let value: serde_json::Value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"], serde_json::json!([1, 2]));
        assert!(value.get("error").is_none());
    }
}

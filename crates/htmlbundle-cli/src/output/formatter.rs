//! Output formatter trait for CLI results.

use anyhow::Result;
use htmlbundle_core::BundleManifest;
use htmlbundle_core::ExtractionResult;
use htmlbundle_core::ResolvedFile;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, result: &ExtractionResult) -> Result<()>;

    /// Format inspection manifest
    fn format_manifest(&self, manifest: &BundleManifest) -> Result<()>;

    /// Format a resolved file descriptor and its headers
    fn format_resolved(&self, file: &ResolvedFile) -> Result<()>;

    /// Format cleanup confirmation
    fn format_cleanup(&self, dir: &Path) -> Result<()>;

    /// Format error message for a failed operation
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
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
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
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use htmlbundle_core::BundleManifest;
use htmlbundle_core::ExtractionResult;
use htmlbundle_core::ResolvedFile;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExtractionOutput {
    bundle_root: String,
    entry_document_path: String,
    relative_bundle_root: String,
    strategy: &'static str,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl From<&ExtractionResult> for ExtractionOutput {
    fn from(result: &ExtractionResult) -> Self {
        Self {
            bundle_root: result.bundle_root.display().to_string(),
            entry_document_path: result.entry_document_path.display().to_string(),
            relative_bundle_root: result.relative_bundle_root.clone(),
            strategy: result.strategy.as_str(),
            files_extracted: result.files_extracted,
            directories_created: result.directories_created,
            bytes_written: result.bytes_written,
            duration_ms: result.duration.as_millis(),
        }
    }
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    name: &'a str,
    is_directory: bool,
    size: u64,
}

#[derive(Serialize)]
struct ManifestOutput<'a> {
    file_count: usize,
    total_bytes: u64,
    entry_document: &'a str,
    relative_bundle_root: &'a str,
    strategy: &'static str,
    entries: Vec<ManifestEntry<'a>>,
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, result: &ExtractionResult) -> Result<()> {
        Self::output(&JsonOutput::success(
            "extract",
            ExtractionOutput::from(result),
        ))
    }

    fn format_manifest(&self, manifest: &BundleManifest) -> Result<()> {
        let data = ManifestOutput {
            file_count: manifest.file_count,
            total_bytes: manifest.total_bytes,
            entry_document: &manifest.entry_document.path,
            relative_bundle_root: manifest.entry_document.relative_root(),
            strategy: manifest.entry_document.strategy.as_str(),
            entries: manifest
                .entries
                .iter()
                .map(|entry| ManifestEntry {
                    name: entry.normalized_name(),
                    is_directory: entry.is_directory(),
                    size: entry.uncompressed_size(),
                })
                .collect(),
        };
        Self::output(&JsonOutput::success("inspect", data))
    }

    fn format_resolved(&self, file: &ResolvedFile) -> Result<()> {
        #[derive(Serialize)]
        struct ResolvedOutput {
            path: String,
            content_type: &'static str,
            content_length: u64,
            headers: Vec<Header>,
        }

        #[derive(Serialize)]
        struct Header {
            name: &'static str,
            value: String,
        }

        let data = ResolvedOutput {
            path: file.path().display().to_string(),
            content_type: file.content_type(),
            content_length: file.len(),
            headers: file
                .headers()
                .into_iter()
                .map(|(name, value)| Header { name, value })
                .collect(),
        };
        Self::output(&JsonOutput::success("resolve", data))
    }

    fn format_cleanup(&self, dir: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct CleanupOutput {
            path: String,
            removed: bool,
        }

        let data = CleanupOutput {
            path: dir.display().to_string(),
            removed: !dir.exists(),
        };
        Self::output(&JsonOutput::success("cleanup", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

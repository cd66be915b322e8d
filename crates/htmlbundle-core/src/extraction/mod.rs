//! Bundle extraction: a validation pass followed by a write pass.
//!
//! Nothing touches the destination until every entry has passed the policy
//! checks and an entry document has been chosen, so a rejected archive never
//! leaves partial output behind.

pub mod cleanup;
pub mod entry_document;
pub mod scan;
pub mod writer;

use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

pub use cleanup::cleanup_bundle;
pub use entry_document::ENTRY_DOCUMENT_NAME;
pub use entry_document::EntryDocument;
pub use entry_document::EntryStrategy;
pub use entry_document::locate_entry_document;

use crate::BundleError;
use crate::BundlePolicy;
use crate::ExtractionResult;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::types::DestDir;

/// Validates and extracts HTML bundle archives under a fixed policy.
///
/// The extractor holds no mutable state; one instance can serve any number of
/// concurrent extractions into distinct destinations.
///
/// # Examples
///
/// ```no_run
/// use htmlbundle_core::BundleExtractor;
/// use htmlbundle_core::BundlePolicy;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = BundleExtractor::new(BundlePolicy::default());
/// let result = extractor.extract("upload.zip", "/srv/bundles/42")?;
/// println!("serving from {}", result.bundle_root.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BundleExtractor {
    policy: BundlePolicy,
}

impl BundleExtractor {
    /// Creates an extractor enforcing `policy`.
    #[must_use]
    pub const fn new(policy: BundlePolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy this extractor enforces.
    #[must_use]
    pub const fn policy(&self) -> &BundlePolicy {
        &self.policy
    }

    /// Extracts `archive_path` into `destination`.
    ///
    /// # Errors
    ///
    /// Returns a validation error (`TooManyFiles`, `BundleTooLarge`,
    /// `ForbiddenFileType`, `PathTraversal`, `MissingEntryDocument`) before
    /// anything is written, `EntryDocumentMissingPostExtract` if the entry
    /// document is not on disk afterwards, `InvalidArchive` for malformed
    /// ZIP data, and `Storage` for filesystem failures.
    pub fn extract(
        &self,
        archive_path: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<ExtractionResult> {
        self.extract_with_progress(archive_path, destination, &mut NoopProgress)
    }

    /// Same as [`extract`](Self::extract), reporting write-pass progress.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn extract_with_progress(
        &self,
        archive_path: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionResult> {
        let archive_path = archive_path.as_ref();
        let destination = destination.as_ref();
        info!(
            archive = %archive_path.display(),
            destination = %destination.display(),
            "extracting HTML bundle"
        );

        let outcome = self.run(archive_path, destination, progress);
        match &outcome {
            Ok(result) => info!(
                bundle_root = %result.bundle_root.display(),
                entry_document = %result.entry_document_path.display(),
                files = result.files_extracted,
                bytes = result.bytes_written,
                "extracted HTML bundle"
            ),
            Err(e) if e.is_storage_failure() => error!(
                archive = %archive_path.display(),
                error = %e,
                "storage failure while extracting HTML bundle"
            ),
            Err(e) => warn!(
                archive = %archive_path.display(),
                code = e.code(),
                error = %e,
                "rejected HTML bundle"
            ),
        }
        outcome
    }

    fn run(
        &self,
        archive_path: &Path,
        destination: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionResult> {
        let started = Instant::now();
        let dest = DestDir::create(destination)?;
        let mut archive = scan::open_archive(archive_path)?;

        let report = scan::scan_archive(&mut archive, &self.policy)?;
        let document =
            locate_entry_document(&report.file_paths()).ok_or(BundleError::MissingEntryDocument)?;
        debug!(
            entry_document = %document.path,
            strategy = %document.strategy,
            "selected entry document"
        );

        let stats = writer::write_entries(&mut archive, &report, &dest, progress)?;

        let entry_document_path = extracted_entry_document(&dest, &document)?;
        let bundle_root = entry_document_path
            .parent()
            .unwrap_or_else(|| dest.as_path())
            .to_path_buf();

        Ok(ExtractionResult {
            bundle_root,
            entry_document_path,
            relative_bundle_root: document.relative_root().to_string(),
            strategy: document.strategy,
            files_extracted: stats.files_extracted,
            directories_created: stats.directories_created,
            bytes_written: stats.bytes_written,
            duration: started.elapsed(),
        })
    }

    /// Removes an extracted bundle. See [`cleanup_bundle`].
    pub fn cleanup(&self, path: impl AsRef<Path>) {
        cleanup_bundle(path);
    }
}

/// Confirms the chosen entry document exists as a regular file after the
/// write pass.
///
/// Validation already rules out layouts that would put a directory at the
/// document's path, so this fails only when the tree changed under the
/// extractor or a case-insensitive filesystem folded two entry names together.
fn extracted_entry_document(dest: &DestDir, document: &EntryDocument) -> Result<PathBuf> {
    writer::entry_document_target(dest, &document.path)
        .filter(|path| path.is_file())
        .ok_or_else(|| BundleError::EntryDocumentMissingPostExtract {
            path: dest.as_path().join(&document.path),
        })
}

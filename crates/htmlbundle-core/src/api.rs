//! High-level public API for bundle extraction.

use std::path::Path;

use crate::BundleExtractor;
use crate::BundlePolicy;
use crate::ExtractionResult;
use crate::ProgressCallback;
use crate::Result;

/// Extracts an HTML bundle archive into `destination`.
///
/// # Arguments
///
/// * `archive_path` - Path to the ZIP archive
/// * `destination` - Directory the bundle is extracted into (created if
///   missing)
/// * `policy` - Limits the archive must satisfy
///
/// # Errors
///
/// Returns an error if:
/// - The archive breaks a policy limit or holds an unsafe entry name
/// - No `index.html` exists in the archive
/// - The archive is not a readable ZIP file
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use htmlbundle_core::BundlePolicy;
/// use htmlbundle_core::extract_bundle;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = extract_bundle("upload.zip", "/srv/bundles/42", &BundlePolicy::default())?;
/// println!("entry document: {}", result.entry_document_path.display());
/// # Ok(())
/// # }
/// ```
pub fn extract_bundle<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    destination: Q,
    policy: &BundlePolicy,
) -> Result<ExtractionResult> {
    BundleExtractor::new(policy.clone()).extract(archive_path, destination)
}

/// Extracts an HTML bundle archive, reporting write-pass progress.
///
/// # Errors
///
/// See [`extract_bundle`].
pub fn extract_bundle_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    destination: Q,
    policy: &BundlePolicy,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionResult> {
    BundleExtractor::new(policy.clone()).extract_with_progress(archive_path, destination, progress)
}

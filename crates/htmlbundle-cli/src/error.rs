//! Error conversion utilities for CLI.
//!
//! Converts htmlbundle-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use htmlbundle_core::BundleError;
use std::path::Path;

/// Converts `BundleError` to a user-friendly anyhow error with context.
///
/// `subject` is the archive for extraction errors and the bundle root for
/// serve errors.
pub fn convert_bundle_error(err: BundleError, subject: &Path) -> anyhow::Error {
    let code = err.code();
    match err {
        BundleError::TooManyFiles { count, max } => anyhow!(
            "[{code}] Bundle '{}' has too many files ({count} > {max})\n\
             HINT: Use --max-files to raise the limit.",
            subject.display()
        ),
        BundleError::BundleTooLarge { total, max } => anyhow!(
            "[{code}] Bundle '{}' is too large ({total} > {max} bytes)\n\
             HINT: Use --max-total-size to raise the limit.",
            subject.display()
        ),
        BundleError::ForbiddenFileType { name } => anyhow!(
            "[{code}] Bundle '{}' contains a forbidden file type: '{name}'\n\
             HINT: Remove the file from the bundle, or adjust forbidden_extensions in a --policy file.",
            subject.display()
        ),
        BundleError::PathTraversal { name } => anyhow!(
            "[{code}] Security violation: bundle '{}' attempted path traversal with '{name}'\n\
             HINT: This archive may be malicious. Do not extract from untrusted sources.",
            subject.display()
        ),
        BundleError::MissingEntryDocument => anyhow!(
            "[{code}] Bundle '{}' has no index.html\n\
             HINT: Put index.html at the top of the archive or inside its single top-level folder.",
            subject.display()
        ),
        BundleError::PathEscapesRoot { path } => anyhow!(
            "[{code}] Request '{}' escapes bundle root '{}'",
            path.display(),
            subject.display()
        ),
        BundleError::FileNotFound { path } => anyhow!(
            "[{code}] File '{}' not found in bundle '{}'",
            path.display(),
            subject.display()
        ),
        BundleError::IsDirectory { path } => anyhow!(
            "[{code}] '{}' is a directory; directories are not served",
            path.display()
        ),
        BundleError::InvalidArchive(reason) => anyhow!(
            "[{code}] Invalid archive '{}': {reason}\n\
             HINT: The archive may be corrupted or not a ZIP file.",
            subject.display()
        ),
        BundleError::Storage(io_err) => anyhow!(
            "[{code}] I/O error while processing '{}': {io_err}",
            subject.display()
        ),
        other => anyhow::Error::from(other).context(format!("[{code}] '{}'", subject.display())),
    }
}

/// Adds bundle context to a core result.
pub fn add_bundle_context<T>(result: Result<T, BundleError>, subject: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_bundle_error(e, subject))
}

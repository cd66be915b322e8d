//! User-facing error message formatting.
//!
//! Upload and serve handlers surface these messages to end users, so paths
//! can be reduced to their final component to avoid leaking server layout.

use std::path::Path;

use super::types::BundleError;

/// Structured error message for user-facing surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleErrorMessage {
    /// Stable error code (e.g., `PATH_TRAVERSAL`, `TOO_MANY_FILES`).
    pub code: &'static str,

    /// Human-readable error description.
    pub description: String,

    /// Optional additional context.
    pub context: Option<String>,
}

impl BundleError {
    /// Formats the error for display to an end user.
    ///
    /// # Arguments
    ///
    /// * `sanitize_paths` - If true, only the final path component of server
    ///   paths and entry names is shown.
    ///
    /// # Examples
    ///
    /// ```
    /// use htmlbundle_core::BundleError;
    /// use std::path::PathBuf;
    ///
    /// let error = BundleError::EntryDocumentMissingPostExtract {
    ///     path: PathBuf::from("/srv/bundles/42/index.html"),
    /// };
    ///
    /// let msg = error.to_message(true);
    /// assert_eq!(msg.code, "ENTRY_DOCUMENT_MISSING_POST_EXTRACT");
    /// assert!(!msg.description.contains("/srv/"));
    /// ```
    #[must_use]
    pub fn to_message(&self, sanitize_paths: bool) -> BundleErrorMessage {
        let (description, context) = match self {
            Self::TooManyFiles { count, max } => (
                "too many files in HTML bundle".to_string(),
                Some(format!("limit: {max} files, reached {count}")),
            ),
            Self::BundleTooLarge { total, max } => (
                "HTML bundle exceeds maximum size".to_string(),
                Some(format!("limit: {max} bytes, reached {total}")),
            ),
            Self::ForbiddenFileType { name } => (
                format!(
                    "forbidden file type in HTML bundle: {}",
                    format_name(name, sanitize_paths)
                ),
                None,
            ),
            Self::PathTraversal { name } => (
                format!(
                    "invalid file path in HTML bundle: {}",
                    format_name(name, sanitize_paths)
                ),
                None,
            ),
            Self::MissingEntryDocument => ("HTML bundle must contain index.html".to_string(), None),
            Self::EntryDocumentMissingPostExtract { path } => (
                format!(
                    "index.html not found after extraction at {}",
                    format_path(path, sanitize_paths)
                ),
                None,
            ),
            Self::PathEscapesRoot { .. } => ("invalid path".to_string(), None),
            Self::FileNotFound { .. } => ("file not found in bundle".to_string(), None),
            Self::IsDirectory { .. } => ("cannot serve directory".to_string(), None),
            Self::InvalidArchive(reason) => (format!("invalid archive: {reason}"), None),
            Self::InvalidBundleId { id } => (format!("invalid bundle id: {id:?}"), None),
            Self::Storage(io_err) => (
                "internal storage error".to_string(),
                Some(io_err.kind().to_string()),
            ),
        };

        BundleErrorMessage {
            code: self.code(),
            description,
            context,
        }
    }
}

fn format_path(path: &Path, sanitize: bool) -> String {
    if sanitize {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>")
            .to_string()
    } else {
        path.display().to_string()
    }
}

fn format_name(name: &str, sanitize: bool) -> String {
    if sanitize {
        name.rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or("<unknown>")
            .to_string()
    } else {
        name.to_string()
    }
}

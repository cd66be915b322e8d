//! Error types for bundle extraction and serving.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `BundleError`.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Errors that can occur while extracting or serving an HTML bundle.
///
/// Every variant is terminal to the current operation. Nothing is retried
/// internally.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The archive holds more files than the policy allows.
    #[error("too many files in HTML bundle ({count} > {max})")]
    TooManyFiles {
        /// Number of files counted when the limit was crossed.
        count: usize,
        /// Maximum allowed file count.
        max: usize,
    },

    /// The declared uncompressed size of all files exceeds the policy.
    #[error("HTML bundle exceeds maximum size ({total} > {max} bytes)")]
    BundleTooLarge {
        /// Running total in bytes when the limit was crossed.
        total: u64,
        /// Maximum allowed total in bytes.
        max: u64,
    },

    /// An entry carries a forbidden file extension.
    #[error("forbidden file type in HTML bundle: {name}")]
    ForbiddenFileType {
        /// Raw entry name as stored in the archive.
        name: String,
    },

    /// An entry name attempts to escape the extraction directory.
    #[error("invalid file path in HTML bundle: {name}")]
    PathTraversal {
        /// Raw entry name as stored in the archive.
        name: String,
    },

    /// No `index.html` was found anywhere in the archive.
    #[error("HTML bundle must contain index.html")]
    MissingEntryDocument,

    /// The chosen entry document is not on disk after extraction.
    #[error("index.html not found after extraction at {path}")]
    EntryDocumentMissingPostExtract {
        /// Expected absolute path of the entry document.
        path: PathBuf,
    },

    /// A requested path resolves outside the bundle root.
    #[error("requested path escapes bundle root: {path}")]
    PathEscapesRoot {
        /// The path as requested by the client.
        path: PathBuf,
    },

    /// A requested path does not exist inside the bundle.
    #[error("file not found in bundle: {path}")]
    FileNotFound {
        /// The path as requested by the client.
        path: PathBuf,
    },

    /// A requested path resolves to a directory.
    #[error("cannot serve directory: {path}")]
    IsDirectory {
        /// The path as requested by the client.
        path: PathBuf,
    },

    /// The archive is corrupted or uses unsupported ZIP features.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// A bundle identifier is not usable as a storage directory name.
    #[error("invalid bundle id: {id:?}")]
    InvalidBundleId {
        /// The rejected identifier.
        id: String,
    },

    /// Filesystem-level failure (permission denied, disk full, I/O error).
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

impl BundleError {
    /// Returns the stable machine-readable identifier for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use htmlbundle_core::BundleError;
    ///
    /// assert_eq!(BundleError::MissingEntryDocument.code(), "MISSING_ENTRY_DOCUMENT");
    /// ```
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TooManyFiles { .. } => "TOO_MANY_FILES",
            Self::BundleTooLarge { .. } => "BUNDLE_TOO_LARGE",
            Self::ForbiddenFileType { .. } => "FORBIDDEN_FILE_TYPE",
            Self::PathTraversal { .. } => "PATH_TRAVERSAL",
            Self::MissingEntryDocument => "MISSING_ENTRY_DOCUMENT",
            Self::EntryDocumentMissingPostExtract { .. } => "ENTRY_DOCUMENT_MISSING_POST_EXTRACT",
            Self::PathEscapesRoot { .. } => "PATH_ESCAPES_ROOT",
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::IsDirectory { .. } => "IS_DIRECTORY",
            Self::InvalidArchive(_) => "INVALID_ARCHIVE",
            Self::InvalidBundleId { .. } => "INVALID_BUNDLE_ID",
            Self::Storage(_) => "STORAGE_FAILURE",
        }
    }

    /// Returns the HTTP status a routing layer should answer with.
    ///
    /// # Examples
    ///
    /// ```
    /// use htmlbundle_core::BundleError;
    /// use std::path::PathBuf;
    ///
    /// let err = BundleError::PathEscapesRoot {
    ///     path: PathBuf::from("../../etc/passwd"),
    /// };
    /// assert_eq!(err.http_status(), 403);
    /// ```
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::PathEscapesRoot { .. } => 403,
            Self::FileNotFound { .. } => 404,
            Self::BundleTooLarge { .. } => 413,
            Self::ForbiddenFileType { .. } => 415,
            Self::TooManyFiles { .. }
            | Self::PathTraversal { .. }
            | Self::MissingEntryDocument
            | Self::IsDirectory { .. }
            | Self::InvalidArchive(_)
            | Self::InvalidBundleId { .. } => 400,
            Self::EntryDocumentMissingPostExtract { .. } | Self::Storage(_) => 500,
        }
    }

    /// Returns `true` if this error represents a security violation.
    ///
    /// Security violations are traversal attempts at either extraction or
    /// serve time, forbidden file types, and resource limit breaches.
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::TooManyFiles { .. }
                | Self::BundleTooLarge { .. }
                | Self::ForbiddenFileType { .. }
                | Self::PathTraversal { .. }
                | Self::PathEscapesRoot { .. }
        )
    }

    /// Returns `true` if this error was raised while validating an archive.
    #[must_use]
    pub const fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Self::TooManyFiles { .. }
                | Self::BundleTooLarge { .. }
                | Self::ForbiddenFileType { .. }
                | Self::PathTraversal { .. }
                | Self::MissingEntryDocument
                | Self::EntryDocumentMissingPostExtract { .. }
                | Self::InvalidArchive(_)
        )
    }

    /// Returns `true` for filesystem-level failures.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<zip::result::ZipError> for BundleError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Storage(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

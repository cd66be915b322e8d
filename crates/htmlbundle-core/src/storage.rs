//! On-disk layout for extracted bundles.
//!
//! Each bundle lives in its own directory `<root>/<bundle_id>`. Only the
//! relative [`BundleRecord`] needs to be persisted; serve roots are rebuilt
//! from it on every request.

use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::BundleError;
use crate::BundleExtractor;
use crate::BundleFileServer;
use crate::Result;
use crate::extraction::cleanup_bundle;
use crate::security::safe_relative_path;
use crate::serve::ResolvedFile;
use crate::types::BundleRecord;

/// Maximum length of a bundle id.
pub const MAX_BUNDLE_ID_LEN: usize = 128;

/// Checks that `id` is usable as a single directory name.
///
/// Ids are limited to ASCII alphanumerics, `-` and `_`.
///
/// # Errors
///
/// Returns `BundleError::InvalidBundleId` for empty, overlong or otherwise
/// unusable ids.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::storage::validate_bundle_id;
///
/// assert!(validate_bundle_id("9x2k-a_b").is_ok());
/// assert!(validate_bundle_id("..").is_err());
/// assert!(validate_bundle_id("a/b").is_err());
/// ```
pub fn validate_bundle_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id.len() <= MAX_BUNDLE_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(BundleError::InvalidBundleId { id: id.to_string() })
    }
}

/// Storage root holding one directory per bundle.
///
/// # Examples
///
/// ```no_run
/// use htmlbundle_core::BundleExtractor;
/// use htmlbundle_core::storage::BundleStorage;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let storage = BundleStorage::new("/srv/bundles");
/// let record = storage.extract(&BundleExtractor::default(), "upload1", "upload.zip")?;
///
/// let file = storage.resolve(&record, "index.html")?;
/// assert_eq!(file.content_type(), "text/html");
///
/// storage.remove(record.bundle_id())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleStorage {
    root: PathBuf,
}

impl BundleStorage {
    /// Creates a storage handle. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a bundle is extracted into.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBundleId` if `bundle_id` is unusable.
    pub fn bundle_dir(&self, bundle_id: &str) -> Result<PathBuf> {
        validate_bundle_id(bundle_id)?;
        Ok(self.root.join(bundle_id))
    }

    /// Serve root for a bundle, rebuilt from its persisted relative root.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBundleId` for an unusable id and `PathEscapesRoot` if
    /// `relative_bundle_root` is absolute or climbs out of the bundle.
    pub fn bundle_root(&self, bundle_id: &str, relative_bundle_root: &str) -> Result<PathBuf> {
        let dir = self.bundle_dir(bundle_id)?;
        if relative_bundle_root.is_empty() {
            return Ok(dir);
        }
        safe_relative_path(relative_bundle_root)
            .map(|relative| dir.join(relative))
            .ok_or_else(|| BundleError::PathEscapesRoot {
                path: PathBuf::from(relative_bundle_root),
            })
    }

    /// Extracts `archive_path` into the bundle directory for `bundle_id`.
    ///
    /// A failed extraction removes the bundle directory before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBundleId` or any error from
    /// [`BundleExtractor::extract`].
    pub fn extract(
        &self,
        extractor: &BundleExtractor,
        bundle_id: &str,
        archive_path: impl AsRef<Path>,
    ) -> Result<BundleRecord> {
        let dir = self.bundle_dir(bundle_id)?;
        match extractor.extract(archive_path, &dir) {
            Ok(result) => BundleRecord::from_extraction(bundle_id, &result),
            Err(e) => {
                cleanup_bundle(&dir);
                Err(e)
            }
        }
    }

    /// Resolves a client path against a stored bundle.
    ///
    /// # Errors
    ///
    /// See [`bundle_root`](Self::bundle_root) and
    /// [`BundleFileServer::resolve`].
    pub fn resolve(&self, record: &BundleRecord, requested: impl AsRef<Path>) -> Result<ResolvedFile> {
        let root = self.bundle_root(record.bundle_id(), record.relative_bundle_root())?;
        BundleFileServer::new().resolve(root, requested)
    }

    /// Removes a bundle directory, best-effort.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBundleId` if `bundle_id` is unusable. Removal failures
    /// are logged, not returned.
    pub fn remove(&self, bundle_id: &str) -> Result<()> {
        let dir = self.bundle_dir(bundle_id)?;
        info!(bundle_id, "removing stored HTML bundle");
        cleanup_bundle(dir);
        Ok(())
    }
}

//! Validated extraction destination type.

use crate::BundleError;
use crate::Result;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// A destination directory for bundle extraction.
///
/// Once constructed, a `DestDir` is an existing directory represented by its
/// absolute canonical path. Every extracted path is derived from it, and the
/// write pass re-checks containment against it before touching the disk.
///
/// # Examples
///
/// ```no_run
/// use htmlbundle_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/srv/bundles/upload-42")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the directory (recursively) if absent and canonicalizes it.
    ///
    /// # Errors
    ///
    /// Returns `BundleError::Storage` if the directory cannot be created or
    /// canonicalized, or if the path exists but is not a directory.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;

        let canonical = path.canonicalize()?;
        if !canonical.is_dir() {
            return Err(BundleError::Storage(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins an already validated relative path to the destination.
    #[inline]
    #[must_use]
    pub fn join(&self, relative: &Path) -> PathBuf {
        self.0.join(relative)
    }

    /// Verifies that `target`'s existing parent chain stays inside the
    /// destination once symlinks are resolved.
    ///
    /// The nearest existing ancestor of `target` is canonicalized; a
    /// pre-existing symlink inside the destination that points elsewhere
    /// makes this fail.
    ///
    /// # Errors
    ///
    /// Returns `BundleError::PathTraversal` (carrying `name`) when the
    /// resolved ancestor is outside the destination.
    pub fn ensure_contains(&self, target: &Path, name: &str) -> Result<()> {
        let mut ancestor = target.parent();
        while let Some(dir) = ancestor {
            match dir.canonicalize() {
                Ok(canonical) => {
                    if canonical.starts_with(&self.0) {
                        return Ok(());
                    }
                    return Err(BundleError::PathTraversal {
                        name: name.to_string(),
                    });
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    ancestor = dir.parent();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(BundleError::PathTraversal {
            name: name.to_string(),
        })
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

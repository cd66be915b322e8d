//! Contained file serving from extracted bundles.
//!
//! Every request is resolved from disk. The bundle root and the requested
//! file are both canonicalized, and the file must sit under the root
//! component-wise, so `..` segments and symlinks planted inside the bundle
//! cannot reach anything outside it.

pub mod content_type;
pub mod resolved;

use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

pub use content_type::DEFAULT_CONTENT_TYPE;
pub use content_type::content_type_for;
pub use resolved::ResolvedFile;

use crate::BundleError;
use crate::Result;
use crate::security::lexical_normalize;

/// Resolves client paths against extracted bundle roots.
///
/// Stateless: it trusts the root it is handed and never replays extraction
/// checks.
///
/// # Examples
///
/// ```no_run
/// use htmlbundle_core::BundleFileServer;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = BundleFileServer::new().resolve("/srv/bundles/42/app", "css/site.css")?;
/// for (name, value) in file.headers() {
///     println!("{name}: {value}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleFileServer;

impl BundleFileServer {
    /// Creates a file server.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves `requested` under `bundle_root`.
    ///
    /// Leading separators in `requested` are ignored, so `/index.html` and
    /// `index.html` name the same file.
    ///
    /// # Errors
    ///
    /// - `PathEscapesRoot` if the path resolves outside the root
    /// - `FileNotFound` if nothing exists there (or the root itself is gone)
    /// - `IsDirectory` if it names a directory
    /// - `Storage` for other filesystem failures
    pub fn resolve(
        &self,
        bundle_root: impl AsRef<Path>,
        requested: impl AsRef<Path>,
    ) -> Result<ResolvedFile> {
        let requested = requested.as_ref();
        let not_found = || BundleError::FileNotFound {
            path: requested.to_path_buf(),
        };

        if requested.as_os_str().as_encoded_bytes().contains(&0) {
            return Err(not_found());
        }

        let root = match bundle_root.as_ref().canonicalize() {
            Ok(root) => root,
            Err(e) if is_missing(&e) => return Err(not_found()),
            Err(e) => return Err(BundleError::Storage(e)),
        };

        let joined = join_request(&root, requested);
        let target = match joined.canonicalize() {
            Ok(target) => target,
            Err(e) if is_missing(&e) => {
                return Err(if lexical_normalize(&joined).starts_with(&root) {
                    not_found()
                } else {
                    escapes(requested)
                });
            }
            Err(e) => return Err(BundleError::Storage(e)),
        };

        if !target.starts_with(&root) {
            return Err(escapes(requested));
        }

        let metadata = match target.metadata() {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => return Err(not_found()),
            Err(e) => return Err(BundleError::Storage(e)),
        };
        if metadata.is_dir() {
            return Err(BundleError::IsDirectory {
                path: requested.to_path_buf(),
            });
        }
        if !metadata.is_file() {
            return Err(not_found());
        }

        let content_type = content_type_for(&target);
        debug!(
            path = %target.display(),
            content_type,
            len = metadata.len(),
            "resolved bundle file"
        );
        Ok(ResolvedFile::new(target, metadata.len(), content_type))
    }
}

/// Resolves `requested` under `bundle_root` with a default [`BundleFileServer`].
///
/// # Errors
///
/// See [`BundleFileServer::resolve`].
pub fn resolve_bundle_file(
    bundle_root: impl AsRef<Path>,
    requested: impl AsRef<Path>,
) -> Result<ResolvedFile> {
    BundleFileServer::new().resolve(bundle_root, requested)
}

/// Appends the request to the root, dropping root and prefix components.
///
/// `..` is kept so canonicalization resolves it against real directories.
fn join_request(root: &Path, requested: &Path) -> PathBuf {
    let mut joined = root.to_path_buf();
    for component in requested.components() {
        match component {
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir | Component::Normal(_) => joined.push(component),
        }
    }
    joined
}

fn is_missing(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn escapes(requested: &Path) -> BundleError {
    BundleError::PathEscapesRoot {
        path: requested.to_path_buf(),
    }
}

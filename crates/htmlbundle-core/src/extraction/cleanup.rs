//! Best-effort removal of extracted bundles.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use tracing::info;
use tracing::warn;

/// Recursively removes `path`, logging instead of failing.
///
/// A path that does not exist is treated as already cleaned up. Any other
/// failure is logged at `warn` and swallowed, so callers can run this on
/// error paths without masking the original error.
pub fn cleanup_bundle(path: impl AsRef<Path>) {
    let path = path.as_ref();
    match fs::remove_dir_all(path) {
        Ok(()) => info!(path = %path.display(), "removed HTML bundle"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "HTML bundle already removed");
        }
        Err(e) => warn!(
            path = %path.display(),
            error = %e,
            "failed to remove HTML bundle"
        ),
    }
}

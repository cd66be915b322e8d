//! Progress reporting for the extraction write pass.

use std::path::Path;

/// Callback trait for progress reporting during extraction.
///
/// Callbacks only fire during the write pass; a bundle rejected by
/// validation produces no events. The trait requires `Send` so a callback can
/// travel with the extraction onto a worker thread.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::ProgressCallback;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("{current}/{total}: {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before an entry is written.
    ///
    /// * `path` - Normalized entry path relative to the destination
    /// * `total` - Total number of entries in the archive
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called with the number of bytes written for the current entry.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called once an entry has been written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when every entry has been written.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

//! Result of a successful bundle extraction.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::extraction::EntryStrategy;

/// Description of an extracted bundle, owned by the caller.
///
/// The caller persists the relevant parts (usually through a
/// [`BundleRecord`](crate::types::BundleRecord)) and later hands
/// [`bundle_root`](Self::bundle_root) to the file server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Absolute directory containing the entry document.
    pub bundle_root: PathBuf,

    /// Absolute path of the entry document inside `bundle_root`.
    pub entry_document_path: PathBuf,

    /// `bundle_root` relative to the extraction destination, empty when the
    /// entry document sits at the top of the archive.
    pub relative_bundle_root: String,

    /// Strategy that located the entry document.
    pub strategy: EntryStrategy,

    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Wall-clock duration of the extraction.
    pub duration: Duration,
}

impl ExtractionResult {
    /// Returns the entry document path relative to the bundle root.
    #[must_use]
    pub fn entry_document_name(&self) -> &Path {
        self.entry_document_path
            .strip_prefix(&self.bundle_root)
            .unwrap_or(&self.entry_document_path)
    }

    /// Returns whether the entry document lives at the top of the archive.
    #[must_use]
    pub fn is_root_bundle(&self) -> bool {
        self.relative_bundle_root.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(relative: &str) -> ExtractionResult {
        let dest = PathBuf::from("/srv/bundles/1");
        let bundle_root = if relative.is_empty() {
            dest
        } else {
            dest.join(relative)
        };
        ExtractionResult {
            entry_document_path: bundle_root.join("index.html"),
            bundle_root,
            relative_bundle_root: relative.to_string(),
            strategy: EntryStrategy::RootIndex,
            files_extracted: 1,
            directories_created: 0,
            bytes_written: 10,
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_entry_document_name() {
        assert_eq!(sample("").entry_document_name(), Path::new("index.html"));
        assert_eq!(sample("app").entry_document_name(), Path::new("index.html"));
    }

    #[test]
    fn test_is_root_bundle() {
        assert!(sample("").is_root_bundle());
        assert!(!sample("app").is_root_bundle());
    }
}

//! Manifest produced by bundle inspection.

use crate::extraction::EntryDocument;
use crate::types::ArchiveEntry;

/// Everything inspection learned about an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleManifest {
    /// Every entry in archive order, directories included.
    pub entries: Vec<ArchiveEntry>,

    /// Number of non-directory entries.
    pub file_count: usize,

    /// Total declared uncompressed size of non-directory entries.
    pub total_bytes: u64,

    /// Entry document extraction would serve the bundle from.
    pub entry_document: EntryDocument,
}

impl BundleManifest {
    /// Number of directory entries.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_directory()).count()
    }

    /// Iterates over non-directory entries.
    pub fn files(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter().filter(|e| !e.is_directory())
    }
}

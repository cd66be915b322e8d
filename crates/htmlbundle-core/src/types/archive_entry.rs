//! Archive entry metadata collected during the validation pass.

/// One ZIP member as seen by the validation pass.
///
/// Entries only live for the duration of an extraction (or inspection). The
/// normalized name is what the bundle layout, entry document lookup and write
/// pass work with; the raw name is kept for error reporting and for the
/// traversal check, which never trusts normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    index: usize,
    raw_name: String,
    normalized_name: String,
    is_directory: bool,
    uncompressed_size: u64,
}

impl ArchiveEntry {
    /// Creates an entry from its central directory record.
    #[must_use]
    pub fn new(index: usize, raw_name: &str, is_directory: bool, uncompressed_size: u64) -> Self {
        Self {
            index,
            raw_name: raw_name.to_string(),
            normalized_name: normalize_entry_name(raw_name),
            is_directory,
            uncompressed_size,
        }
    }

    /// Position of the entry in the archive's central directory.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Entry name exactly as stored in the archive.
    #[must_use]
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Entry name with a leading `./` stripped and `\` converted to `/`.
    #[must_use]
    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    /// Whether the entry is a directory.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Declared uncompressed size in bytes.
    #[must_use]
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }
}

/// Strips one leading `./` and converts backslashes to forward slashes.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::types::archive_entry::normalize_entry_name;
///
/// assert_eq!(normalize_entry_name("./site/index.html"), "site/index.html");
/// assert_eq!(normalize_entry_name("site\\css\\main.css"), "site/css/main.css");
/// ```
#[must_use]
pub fn normalize_entry_name(raw: &str) -> String {
    raw.strip_prefix("./").unwrap_or(raw).replace('\\', "/")
}

//! Entry validation orchestrator.
//!
//! This module provides the `EntryValidator` type that applies every policy
//! check to archive entries, in archive order, before anything is written.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::BundleError;
use crate::BundlePolicy;
use crate::Result;
use crate::security::path::safe_relative_path;
use crate::security::path::validate_entry_name;
use crate::security::quota::QuotaTracker;
use crate::types::ArchiveEntry;

/// Outcome of a complete validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Every entry in archive order, directories included.
    pub entries: Vec<ArchiveEntry>,

    /// Number of non-directory entries.
    pub file_count: usize,

    /// Total declared uncompressed size of non-directory entries.
    pub total_bytes: u64,
}

impl ValidationReport {
    /// Normalized names of non-directory entries, in archive order.
    #[must_use]
    pub fn file_paths(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| !entry.is_directory())
            .map(ArchiveEntry::normalized_name)
            .collect()
    }
}

/// Applies the bundle policy to archive entries.
///
/// The validator keeps the running quota across entries, so entries must be
/// fed in archive order and the first failure is terminal.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::BundlePolicy;
/// use htmlbundle_core::security::EntryValidator;
/// use htmlbundle_core::types::ArchiveEntry;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let policy = BundlePolicy::default();
/// let mut validator = EntryValidator::new(&policy);
///
/// validator.validate_entry(ArchiveEntry::new(0, "index.html", false, 512))?;
/// assert!(
///     validator
///         .validate_entry(ArchiveEntry::new(1, "../escape.html", false, 1))
///         .is_err()
/// );
///
/// let report = validator.finish();
/// assert_eq!(report.file_count, 1);
/// # Ok(())
/// # }
/// ```
pub struct EntryValidator<'a> {
    policy: &'a BundlePolicy,
    quota: QuotaTracker,
    entries: Vec<ArchiveEntry>,
    files: HashSet<PathBuf>,
    directories: HashSet<PathBuf>,
}

impl<'a> EntryValidator<'a> {
    /// Creates a validator for one archive.
    #[must_use]
    pub fn new(policy: &'a BundlePolicy) -> Self {
        Self {
            policy,
            quota: QuotaTracker::new(),
            entries: Vec::new(),
            files: HashSet::new(),
            directories: HashSet::new(),
        }
    }

    /// Validates one entry and records it.
    ///
    /// Checks run in this order: file count, total size, forbidden
    /// extension, traversal on the raw name, then layout. Directories skip
    /// the count, size and extension checks but are still traversal-checked.
    ///
    /// The layout check rejects, as `PathTraversal`, anything the write pass
    /// could not place: a file whose name has no normal component (`.`,
    /// the empty name) and a file that another entry uses as a directory.
    /// Directory entries such as `./` that name the destination itself are
    /// accepted and later skipped.
    ///
    /// # Errors
    ///
    /// Returns the first policy violation found.
    pub fn validate_entry(&mut self, entry: ArchiveEntry) -> Result<()> {
        if !entry.is_directory() {
            self.quota
                .record_file(entry.uncompressed_size(), self.policy)?;

            if self.policy.is_extension_forbidden(entry.raw_name()) {
                return Err(BundleError::ForbiddenFileType {
                    name: entry.raw_name().to_string(),
                });
            }
        }

        validate_entry_name(entry.raw_name(), entry.normalized_name())?;
        self.check_layout(&entry)?;

        self.entries.push(entry);
        Ok(())
    }

    fn check_layout(&mut self, entry: &ArchiveEntry) -> Result<()> {
        let Some(relative) = safe_relative_path(entry.normalized_name()) else {
            if entry.is_directory() {
                return Ok(());
            }
            return Err(invalid_path(entry));
        };

        let occupied = if entry.is_directory() {
            self.files.contains(&relative)
        } else {
            self.directories.contains(&relative)
        };
        if occupied || parents(&relative).any(|parent| self.files.contains(parent)) {
            return Err(invalid_path(entry));
        }

        self.directories.extend(parents(&relative).map(Path::to_path_buf));
        if entry.is_directory() {
            self.directories.insert(relative);
        } else {
            self.files.insert(relative);
        }
        Ok(())
    }

    /// Consumes the validator and returns the accumulated report.
    #[must_use]
    pub fn finish(self) -> ValidationReport {
        ValidationReport {
            file_count: self.quota.file_count(),
            total_bytes: self.quota.total_bytes(),
            entries: self.entries,
        }
    }
}

/// Proper, non-empty ancestors of a relative path.
fn parents(relative: &Path) -> impl Iterator<Item = &Path> {
    relative
        .ancestors()
        .skip(1)
        .filter(|parent| !parent.as_os_str().is_empty())
}

fn invalid_path(entry: &ArchiveEntry) -> BundleError {
    BundleError::PathTraversal {
        name: entry.raw_name().to_string(),
    }
}

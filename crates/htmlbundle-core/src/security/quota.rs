//! File count and total size tracking for the validation pass.

use crate::BundleError;
use crate::BundlePolicy;
use crate::Result;

/// Tracks the running file count and declared size of a bundle.
#[derive(Debug, Default)]
pub struct QuotaTracker {
    file_count: usize,
    total_bytes: u64,
}

impl QuotaTracker {
    /// Creates a new quota tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one non-directory entry.
    ///
    /// The count is checked before the size, so an archive breaching both
    /// limits on the same entry reports `TooManyFiles`.
    ///
    /// # Errors
    ///
    /// Returns `TooManyFiles` or `BundleTooLarge` once a limit is crossed.
    /// A total that would overflow `u64` is reported as `BundleTooLarge`.
    pub fn record_file(&mut self, size: u64, policy: &BundlePolicy) -> Result<()> {
        self.file_count = self.file_count.saturating_add(1);
        if self.file_count > policy.max_files() {
            return Err(BundleError::TooManyFiles {
                count: self.file_count,
                max: policy.max_files(),
            });
        }

        let Some(total) = self.total_bytes.checked_add(size) else {
            return Err(BundleError::BundleTooLarge {
                total: u64::MAX,
                max: policy.max_total_bytes(),
            });
        };
        self.total_bytes = total;
        if self.total_bytes > policy.max_total_bytes() {
            return Err(BundleError::BundleTooLarge {
                total: self.total_bytes,
                max: policy.max_total_bytes(),
            });
        }

        Ok(())
    }

    /// Returns the number of files recorded.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Returns the total declared bytes recorded.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}

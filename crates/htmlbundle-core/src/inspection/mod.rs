//! Bundle inspection without extraction.
//!
//! Inspection runs the same validation pass and entry document selection as
//! extraction, then stops. Nothing is decompressed and nothing is written.
//!
//! # Examples
//!
//! ```no_run
//! use htmlbundle_core::BundlePolicy;
//! use htmlbundle_core::inspect_bundle;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = inspect_bundle("upload.zip", &BundlePolicy::default())?;
//! println!(
//!     "{} files, entry document {}",
//!     manifest.file_count, manifest.entry_document.path
//! );
//! # Ok(())
//! # }
//! ```

pub mod manifest;

use std::path::Path;

use tracing::debug;

pub use manifest::BundleManifest;

use crate::BundleError;
use crate::BundlePolicy;
use crate::Result;
use crate::extraction::locate_entry_document;
use crate::extraction::scan;

/// Validates an archive and reports what extraction would produce.
///
/// # Errors
///
/// Returns the same validation errors as extraction, `InvalidArchive` for
/// malformed ZIP data, and `Storage` if the archive cannot be read.
pub fn inspect_bundle(
    archive_path: impl AsRef<Path>,
    policy: &BundlePolicy,
) -> Result<BundleManifest> {
    let archive_path = archive_path.as_ref();
    let mut archive = scan::open_archive(archive_path)?;
    let report = scan::scan_archive(&mut archive, policy)?;
    let entry_document =
        locate_entry_document(&report.file_paths()).ok_or(BundleError::MissingEntryDocument)?;

    debug!(
        archive = %archive_path.display(),
        files = report.file_count,
        entry_document = %entry_document.path,
        "inspected HTML bundle"
    );

    Ok(BundleManifest {
        entries: report.entries,
        file_count: report.file_count,
        total_bytes: report.total_bytes,
        entry_document,
    })
}

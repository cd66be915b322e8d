//! Persisted description of an extracted bundle.

use std::path::Component;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::BundleError;
use crate::ExtractionResult;
use crate::Result;
use crate::security::safe_relative_path;
use crate::storage::validate_bundle_id;

/// The part of an [`ExtractionResult`] a metadata store keeps.
///
/// All paths are relative, so records survive a move of the storage root.
/// Every constructor validates, and deserialization goes through the same
/// checks and rejects unknown keys.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::types::BundleRecord;
///
/// # fn main() -> Result<(), htmlbundle_core::BundleError> {
/// let record = BundleRecord::new("9f2c", "app", "index.html")?;
/// assert_eq!(record.relative_bundle_root(), "app");
///
/// assert!(BundleRecord::new("9f2c", "../other", "index.html").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBundleRecord")]
pub struct BundleRecord {
    bundle_id: String,
    relative_bundle_root: String,
    entry_document: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBundleRecord {
    bundle_id: String,
    relative_bundle_root: String,
    entry_document: String,
}

impl TryFrom<RawBundleRecord> for BundleRecord {
    type Error = BundleError;

    fn try_from(raw: RawBundleRecord) -> Result<Self> {
        Self::new(raw.bundle_id, raw.relative_bundle_root, raw.entry_document)
    }
}

impl BundleRecord {
    /// Creates a record from its three fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBundleId` for an unusable id and `PathEscapesRoot` if
    /// either path is absolute or contains `..`. The entry document must name
    /// a file, so an empty one is rejected too.
    pub fn new(
        bundle_id: impl Into<String>,
        relative_bundle_root: impl Into<String>,
        entry_document: impl Into<String>,
    ) -> Result<Self> {
        let bundle_id = bundle_id.into();
        let relative_bundle_root = relative_bundle_root.into();
        let entry_document = entry_document.into();

        validate_bundle_id(&bundle_id)?;
        if !relative_bundle_root.is_empty() && safe_relative_path(&relative_bundle_root).is_none() {
            return Err(BundleError::PathEscapesRoot {
                path: relative_bundle_root.into(),
            });
        }
        if safe_relative_path(&entry_document).is_none() {
            return Err(BundleError::PathEscapesRoot {
                path: entry_document.into(),
            });
        }

        Ok(Self {
            bundle_id,
            relative_bundle_root,
            entry_document,
        })
    }

    /// Builds the record for an extraction stored under `bundle_id`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn from_extraction(bundle_id: impl Into<String>, result: &ExtractionResult) -> Result<Self> {
        Self::new(
            bundle_id,
            result.relative_bundle_root.clone(),
            slash_path(result.entry_document_name()),
        )
    }

    /// Storage identifier of the bundle.
    #[must_use]
    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    /// Directory holding the entry document, relative to the bundle directory.
    #[must_use]
    pub fn relative_bundle_root(&self) -> &str {
        &self.relative_bundle_root
    }

    /// Entry document path, relative to the bundle root.
    #[must_use]
    pub fn entry_document(&self) -> &str {
        &self.entry_document
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

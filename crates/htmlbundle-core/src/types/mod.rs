//! Value types shared by extraction, serving and storage.
//!
//! Types that carry a security guarantee ([`DestDir`], [`BundleRecord`]) are
//! validated on construction and have no unchecked `From` conversions.

pub mod archive_entry;
pub mod dest_dir;
pub mod extraction_result;
pub mod record;

pub use archive_entry::ArchiveEntry;
pub use dest_dir::DestDir;
pub use extraction_result::ExtractionResult;
pub use record::BundleRecord;

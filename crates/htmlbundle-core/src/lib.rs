//! Validation, extraction and contained serving of HTML bundle archives.
//!
//! `htmlbundle-core` takes user-uploaded ZIP archives holding a static web
//! page, checks them against a [`BundlePolicy`], extracts them under a
//! server-controlled directory and later serves their files one by one. It
//! defends against path traversal and resource exhaustion at extraction time
//! and again at serve time.
//!
//! # Examples
//!
//! ```no_run
//! use htmlbundle_core::BundlePolicy;
//! use htmlbundle_core::extract_bundle;
//! use htmlbundle_core::resolve_bundle_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = extract_bundle("upload.zip", "/srv/bundles/42", &BundlePolicy::default())?;
//!
//! let file = resolve_bundle_file(&result.bundle_root, "index.html")?;
//! assert_eq!(file.content_type(), "text/html");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod inspection;
pub mod progress;
pub mod security;
pub mod serve;
pub mod storage;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::extract_bundle;
pub use api::extract_bundle_with_progress;
pub use config::BundlePolicy;
pub use config::BundlePolicyBuilder;
pub use error::BundleError;
pub use error::BundleErrorMessage;
pub use error::Result;
pub use extraction::BundleExtractor;
pub use extraction::EntryStrategy;
pub use extraction::cleanup_bundle;
pub use inspection::BundleManifest;
pub use inspection::inspect_bundle;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
pub use serve::BundleFileServer;
pub use serve::ResolvedFile;
pub use serve::resolve_bundle_file;
pub use storage::BundleStorage;
pub use types::BundleRecord;
pub use types::ExtractionResult;

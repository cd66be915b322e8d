//! Error types for bundle extraction and serving.

pub mod messages;
pub mod types;

pub use messages::BundleErrorMessage;
pub use types::BundleError;
pub use types::Result;

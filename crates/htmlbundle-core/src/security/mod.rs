//! Security validation modules.

pub mod path;
pub mod quota;
pub mod validator;

// Re-export public types and functions
pub use path::lexical_normalize;
pub use path::safe_relative_path;
pub use path::validate_entry_name;
pub use quota::QuotaTracker;
pub use validator::EntryValidator;
pub use validator::ValidationReport;

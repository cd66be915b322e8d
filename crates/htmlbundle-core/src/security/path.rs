//! Entry name traversal validation.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::BundleError;
use crate::Result;

/// Rejects entry names that try to leave the extraction directory.
///
/// The raw name is checked first and independently of normalization: any
/// occurrence of `..` or a leading `/` fails, so rewriting backslashes or
/// stripping `./` cannot smuggle a traversal past this check. The normalized
/// name must additionally not start with `/` (a raw `\etc\passwd` becomes
/// `/etc/passwd` once normalized).
///
/// # Errors
///
/// Returns `BundleError::PathTraversal` carrying the raw name.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::security::validate_entry_name;
///
/// assert!(validate_entry_name("app/index.html", "app/index.html").is_ok());
/// assert!(validate_entry_name("../etc/passwd", "../etc/passwd").is_err());
/// assert!(validate_entry_name("\\etc\\passwd", "/etc/passwd").is_err());
/// ```
pub fn validate_entry_name(raw_name: &str, normalized_name: &str) -> Result<()> {
    if raw_name.contains("..")
        || raw_name.starts_with('/')
        || normalized_name.starts_with('/')
        || raw_name.contains('\0')
    {
        return Err(BundleError::PathTraversal {
            name: raw_name.to_string(),
        });
    }
    Ok(())
}

/// Converts a normalized entry name into a relative path made only of
/// normal components.
///
/// `.` segments are dropped. Root, prefix (`C:`) and parent components
/// make the name unsafe and yield `None`, as does a name with no normal
/// component at all.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::security::safe_relative_path;
/// use std::path::PathBuf;
///
/// assert_eq!(safe_relative_path("a/./b.css"), Some(PathBuf::from("a/b.css")));
/// assert_eq!(safe_relative_path("a/../b.css"), None);
/// assert_eq!(safe_relative_path("/b.css"), None);
/// ```
#[must_use]
pub fn safe_relative_path(normalized_name: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(normalized_name).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}

/// Lexically resolves `.` and `..` in an absolute path without touching the
/// filesystem.
///
/// Used at serve time for targets that do not exist, where canonicalization
/// is impossible but containment still has to be decided.
#[must_use]
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    normalized
}

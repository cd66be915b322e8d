//! Extension to content type mapping for served bundle files.

use std::path::Path;

/// Content type for files with an unknown or missing extension.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Returns the content type for `path`, keyed on its lower-cased extension.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::serve::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("index.HTML")), "text/html");
/// assert_eq!(content_type_for(Path::new("data.bin")), "application/octet-stream");
/// ```
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };

    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "otf" => "font/otf",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

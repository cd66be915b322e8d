//! Descriptor for a file that is safe to serve.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// `Cache-Control` value for bundle files. Extracted bundles never change.
pub const CACHE_CONTROL: &str = "max-age=31536000, immutable";

/// `X-Content-Type-Options` value.
pub const CONTENT_TYPE_OPTIONS: &str = "nosniff";

/// `X-Frame-Options` value.
pub const FRAME_OPTIONS: &str = "SAMEORIGIN";

/// A file inside a bundle root, ready to be streamed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    path: PathBuf,
    len: u64,
    content_type: &'static str,
}

impl ResolvedFile {
    pub(crate) const fn new(path: PathBuf, len: u64, content_type: &'static str) -> Self {
        Self {
            path,
            len,
            content_type,
        }
    }

    /// Canonical absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes at resolution time.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` for a zero-byte file.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Content type derived from the file extension.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Response headers every bundle file is served with, in order.
    #[must_use]
    pub fn headers(&self) -> [(&'static str, String); 5] {
        [
            ("Content-Type", self.content_type.to_string()),
            ("Content-Length", self.len.to_string()),
            ("Cache-Control", CACHE_CONTROL.to_string()),
            ("X-Content-Type-Options", CONTENT_TYPE_OPTIONS.to_string()),
            ("X-Frame-Options", FRAME_OPTIONS.to_string()),
        ]
    }

    /// Opens the file for streaming.
    ///
    /// # Errors
    ///
    /// Returns `BundleError::Storage` if the file vanished or cannot be read.
    pub fn open(&self) -> Result<File> {
        Ok(File::open(&self.path)?)
    }

    /// Streams the whole file into `writer`, returning the bytes copied.
    ///
    /// # Errors
    ///
    /// Returns `BundleError::Storage` on any read or write failure.
    pub fn copy_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let mut file = self.open()?;
        let mut buffer = CopyBuffer::new();
        copy_with_buffer(&mut file, writer, &mut buffer)
    }
}

//! Test utilities for building bundle archives in memory.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Creates an in-memory ZIP archive from `(path, content)` pairs.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("index.html", b"<html>"), ("app.js", b"go()")]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builder for bundle test archives.
///
/// Entry names are written exactly as given, so hostile names such as
/// `../evil.html` or `\etc\passwd` can be produced.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("site/")
///     .add_file("site/index.html", b"<html></html>")
///     .add_deflated_file("site/app.js", b"console.log('hi')")
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored (uncompressed) file.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, CompressionMethod::Stored)
    }

    /// Adds a deflate-compressed file.
    #[must_use]
    pub fn add_deflated_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, CompressionMethod::Deflated)
    }

    fn add_with_method(mut self, path: &str, data: &[u8], method: CompressionMethod) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Adds a symlink entry. ZIP stores the link target as the entry content.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        self.zip
            .add_symlink(path, target, SimpleFileOptions::default())
            .unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing the file.
    pub fn write_to(self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.build())
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[test]
    fn test_create_test_zip() {
        let zip_data = create_test_zip(vec![("index.html", b"hello")]);
        let archive = ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_zip_builder_keeps_hostile_names() {
        let zip_data = ZipTestBuilder::new()
            .add_file("../evil.html", b"x")
            .add_directory("dir/")
            .build();
        let mut archive = ZipArchive::new(Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().name(), "../evil.html");
        assert!(archive.by_index(1).unwrap().is_dir());
    }
}

//! Validation pass over the ZIP central directory.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use zip::ZipArchive;

use crate::BundlePolicy;
use crate::Result;
use crate::security::EntryValidator;
use crate::security::ValidationReport;
use crate::types::ArchiveEntry;

/// Opens a ZIP file for random access to its central directory.
///
/// # Errors
///
/// Returns `BundleError::Storage` if the file cannot be opened and
/// `BundleError::InvalidArchive` if it is not a readable ZIP archive.
pub fn open_archive(archive_path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(archive_path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// Runs every policy check over every entry, in archive order.
///
/// Only central directory metadata is read; no entry is decompressed and
/// nothing is written.
///
/// # Errors
///
/// Returns the first policy violation, or `InvalidArchive` when an entry
/// record cannot be read.
pub fn scan_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    policy: &BundlePolicy,
) -> Result<ValidationReport> {
    let mut validator = EntryValidator::new(policy);

    for index in 0..archive.len() {
        let entry = {
            let file = archive.by_index_raw(index)?;
            ArchiveEntry::new(index, file.name(), file.is_dir(), file.size())
        };
        validator.validate_entry(entry)?;
    }

    Ok(validator.finish())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::BundleError;
    use crate::test_utils::ZipTestBuilder;
    use std::io::Cursor;

    fn archive(data: Vec<u8>) -> ZipArchive<Cursor<Vec<u8>>> {
        ZipArchive::new(Cursor::new(data)).unwrap()
    }

    #[test]
    fn test_scan_collects_entries_in_order() {
        let data = ZipTestBuilder::new()
            .add_directory("site/")
            .add_file("site/index.html", b"<html></html>")
            .add_file("site/app.js", b"1;")
            .build();

        let report = scan_archive(&mut archive(data), &BundlePolicy::default()).unwrap();
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.file_count, 2);
        assert_eq!(report.total_bytes, 15);
        assert_eq!(report.file_paths(), vec!["site/index.html", "site/app.js"]);
    }

    #[test]
    fn test_scan_rejects_traversal() {
        let data = ZipTestBuilder::new()
            .add_file("index.html", b"x")
            .add_file("../../evil.html", b"x")
            .build();

        let result = scan_archive(&mut archive(data), &BundlePolicy::default());
        assert!(matches!(result, Err(BundleError::PathTraversal { .. })));
    }

    #[test]
    fn test_scan_rejects_too_many_files() {
        let data = ZipTestBuilder::new()
            .add_file("a.html", b"1")
            .add_file("b.html", b"2")
            .build();
        let policy = BundlePolicy::builder().max_files(1).build();

        let result = scan_archive(&mut archive(data), &policy);
        assert!(matches!(
            result,
            Err(BundleError::TooManyFiles { count: 2, max: 1 })
        ));
    }

    #[test]
    fn test_open_archive_rejects_garbage() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), b"definitely not a zip").unwrap();

        let result = open_archive(temp.path());
        assert!(matches!(result, Err(BundleError::InvalidArchive(_))));
    }

    #[test]
    fn test_open_archive_missing_file() {
        let result = open_archive(Path::new("/nonexistent/bundle.zip"));
        assert!(matches!(result, Err(BundleError::Storage(_))));
    }
}

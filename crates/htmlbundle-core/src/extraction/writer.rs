//! Write pass: materializes a validated archive under the destination.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use zip::ZipArchive;

use crate::BundleError;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_bounded;
use crate::security::ValidationReport;
use crate::security::safe_relative_path;
use crate::types::ArchiveEntry;
use crate::types::DestDir;

/// Counters accumulated while writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Regular files written.
    pub files_extracted: usize,
    /// Directory entries created.
    pub directories_created: usize,
    /// Bytes written across all files.
    pub bytes_written: u64,
}

/// Writes every entry of `report` under `dest`.
///
/// Existing files at the same path are overwritten. Archive symlink entries
/// are written as regular files holding the link target; no link is ever
/// created on disk.
///
/// # Errors
///
/// Returns `PathTraversal` if an entry would land outside `dest`,
/// `InvalidArchive` if an entry decompresses past its declared size, and
/// `Storage` on any filesystem failure.
pub fn write_entries<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    report: &ValidationReport,
    dest: &DestDir,
    progress: &mut dyn ProgressCallback,
) -> Result<WriteStats> {
    let mut stats = WriteStats::default();
    let mut buffer = CopyBuffer::new();
    let total = report.entries.len();

    for (position, entry) in report.entries.iter().enumerate() {
        let Some(relative) = safe_relative_path(entry.normalized_name()) else {
            if entry.is_directory() {
                // "./" and similar resolve to the destination itself.
                continue;
            }
            return Err(BundleError::PathTraversal {
                name: entry.raw_name().to_string(),
            });
        };

        progress.on_entry_start(&relative, total, position + 1);

        let target = dest.join(&relative);
        dest.ensure_contains(&target, entry.raw_name())?;

        if entry.is_directory() {
            fs::create_dir_all(&target)?;
            stats.directories_created += 1;
        } else {
            let written = write_file(archive, entry, &target, &mut buffer)?;
            progress.on_bytes_written(written);
            stats.files_extracted += 1;
            stats.bytes_written = stats.bytes_written.saturating_add(written);
        }

        progress.on_entry_complete(&relative);
    }

    progress.on_complete();
    Ok(stats)
}

fn write_file<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    entry: &ArchiveEntry,
    target: &Path,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    replace_existing_link(target)?;

    let mut source = archive.by_index(entry.index())?;
    let output = File::create(target)?;
    let mut writer = BufWriter::with_capacity(64 * 1024, output);
    let written = copy_bounded(
        &mut source,
        &mut writer,
        buffer,
        entry.uncompressed_size(),
        entry.raw_name(),
    )?;
    writer.flush()?;

    debug!(path = %target.display(), bytes = written, "wrote bundle file");
    Ok(written)
}

/// Removes a symlink already sitting at `target` so the write cannot follow
/// it out of the destination.
fn replace_existing_link(target: &Path) -> Result<()> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::remove_file(target)?;
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BundleError::Storage(e)),
    }
}

/// Joins the entry document's archive path onto `dest`.
pub(crate) fn entry_document_target(dest: &DestDir, normalized: &str) -> Option<PathBuf> {
    safe_relative_path(normalized).map(|relative| dest.join(&relative))
}

//! Entry document discovery.
//!
//! The entry document is the `index.html` a bundle is served from. Lookup is
//! an ordered list of strategies; the first one that matches wins:
//!
//! 1. [`EntryStrategy::RootIndex`]: `index.html` at the archive root.
//! 2. [`EntryStrategy::SingleTopLevelFolder`]: every nested file lives under
//!    one folder, and that folder holds `index.html`.
//! 3. [`EntryStrategy::FirstAnywhere`]: the first `index.html` in archive
//!    order, at any depth.

use std::fmt;

/// File name of the entry document.
pub const ENTRY_DOCUMENT_NAME: &str = "index.html";

/// A named rule for locating the entry document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStrategy {
    /// `index.html` at the archive root.
    RootIndex,
    /// `<folder>/index.html` when all nested files share one top-level folder.
    SingleTopLevelFolder,
    /// First `index.html` at any depth, in archive order.
    FirstAnywhere,
}

impl EntryStrategy {
    /// All strategies, in precedence order.
    pub const ORDERED: [Self; 3] = [
        Self::RootIndex,
        Self::SingleTopLevelFolder,
        Self::FirstAnywhere,
    ];

    /// Applies this strategy alone to a list of normalized file paths.
    #[must_use]
    pub fn locate<'a>(self, paths: &[&'a str]) -> Option<&'a str> {
        match self {
            Self::RootIndex => paths
                .iter()
                .copied()
                .find(|path| *path == ENTRY_DOCUMENT_NAME),
            Self::SingleTopLevelFolder => {
                let folder = single_top_level_folder(paths)?;
                paths.iter().copied().find(|path| {
                    path.strip_prefix(folder)
                        .and_then(|rest| rest.strip_prefix('/'))
                        == Some(ENTRY_DOCUMENT_NAME)
                })
            }
            Self::FirstAnywhere => paths.iter().copied().find(|path| {
                *path == ENTRY_DOCUMENT_NAME
                    || path
                        .strip_suffix(ENTRY_DOCUMENT_NAME)
                        .is_some_and(|prefix| prefix.ends_with('/'))
            }),
        }
    }

    /// Stable lowercase name, used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RootIndex => "root-index",
            Self::SingleTopLevelFolder => "single-top-level-folder",
            Self::FirstAnywhere => "first-anywhere",
        }
    }
}

impl fmt::Display for EntryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry document chosen for a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDocument {
    /// Normalized archive path of the document.
    pub path: String,
    /// Strategy that found it.
    pub strategy: EntryStrategy,
}

impl EntryDocument {
    /// Directory part of [`path`](Self::path); empty for a root document.
    #[must_use]
    pub fn relative_root(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or("", |(parent, _)| parent)
    }
}

/// Runs the strategies in precedence order over normalized file paths.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::extraction::EntryStrategy;
/// use htmlbundle_core::extraction::locate_entry_document;
///
/// let doc = locate_entry_document(&["app/main.js", "app/index.html"]).unwrap();
/// assert_eq!(doc.path, "app/index.html");
/// assert_eq!(doc.strategy, EntryStrategy::SingleTopLevelFolder);
/// assert_eq!(doc.relative_root(), "app");
/// ```
#[must_use]
pub fn locate_entry_document(paths: &[&str]) -> Option<EntryDocument> {
    EntryStrategy::ORDERED.iter().find_map(|strategy| {
        strategy.locate(paths).map(|path| EntryDocument {
            path: path.to_string(),
            strategy: *strategy,
        })
    })
}

/// Returns the first segment shared by every multi-segment path, if there is
/// exactly one such segment.
///
/// Single-segment (root-level) files are ignored, so a stray `README.md` next
/// to the wrapping folder does not prevent the match.
fn single_top_level_folder<'a>(paths: &[&'a str]) -> Option<&'a str> {
    let mut folder: Option<&str> = None;
    for path in paths {
        let Some((first, _)) = path.split_once('/') else {
            continue;
        };
        match folder {
            None => folder = Some(first),
            Some(existing) if existing == first => {}
            Some(_) => return None,
        }
    }
    folder
}

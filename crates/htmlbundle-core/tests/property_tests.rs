//! Property-based tests for bundle validation and serving.
//!
//! These tests use proptest to generate arbitrary inputs and verify
//! security properties hold across a wide range of cases.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use htmlbundle_core::BundleError;
use htmlbundle_core::BundlePolicy;
use htmlbundle_core::extraction::locate_entry_document;
use htmlbundle_core::resolve_bundle_file;
use htmlbundle_core::security::EntryValidator;
use htmlbundle_core::security::safe_relative_path;
use htmlbundle_core::types::ArchiveEntry;
use htmlbundle_core::types::archive_entry::normalize_entry_name;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn validate(name: &str, policy: &BundlePolicy) -> Result<(), BundleError> {
    let mut validator = EntryValidator::new(policy);
    validator.validate_entry(ArchiveEntry::new(0, name, false, 1))
}

proptest! {
    /// Any name containing a `..` segment is rejected, whatever surrounds it.
    #[test]
    fn prop_parent_traversal_rejected(
        prefix in "([a-z]{1,8}[/\\\\]){0,4}",
        suffix in "([a-z]{1,8}/?){0,4}"
    ) {
        let name = format!("{prefix}../{suffix}");
        let result = validate(&name, &BundlePolicy::default());
        prop_assert!(
            matches!(result, Err(BundleError::PathTraversal { .. })),
            "{name} accepted"
        );
    }

    /// Absolute names are rejected.
    #[test]
    fn prop_absolute_rejected(rest in "[a-z]{1,8}(/[a-z]{1,8}){0,4}") {
        let slash = format!("/{rest}");
        let result = validate(&slash, &BundlePolicy::default());
        prop_assert!(matches!(result, Err(BundleError::PathTraversal { .. })), "{slash}");

        let backslash = format!("\\{}", rest.replace('/', "\\"));
        let result = validate(&backslash, &BundlePolicy::default());
        prop_assert!(matches!(result, Err(BundleError::PathTraversal { .. })), "{backslash}");
    }

    /// Plain relative names pass and normalize to a path without escapes.
    #[test]
    fn prop_valid_relative_names_accepted(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..5)
    ) {
        let name = format!("{}.html", components.join("/"));
        prop_assert!(validate(&name, &BundlePolicy::default()).is_ok());

        let relative = safe_relative_path(&normalize_entry_name(&name)).unwrap();
        prop_assert!(relative.is_relative());
        prop_assert_eq!(relative.components().count(), components.len());
    }

    /// Forbidden suffixes are caught in any letter case.
    #[test]
    fn prop_forbidden_suffix_any_case(
        stem in "[a-z]{1,12}",
        upper in prop::collection::vec(any::<bool>(), 3)
    ) {
        let ext: String = "exe"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let name = format!("{stem}.{ext}");

        let result = validate(&name, &BundlePolicy::default());
        prop_assert!(
            matches!(result, Err(BundleError::ForbiddenFileType { .. })),
            "{name} accepted"
        );
    }

    /// The file count limit triggers exactly one past the maximum.
    #[test]
    fn prop_file_count_limit(max in 1usize..20, extra in 1usize..5) {
        let policy = BundlePolicy::builder().max_files(max).build();
        let mut validator = EntryValidator::new(&policy);

        for i in 0..max {
            let name = format!("f{i}.js");
            prop_assert!(
                validator
                    .validate_entry(ArchiveEntry::new(i, &name, false, 1))
                    .is_ok()
            );
        }
        for i in max..max + extra {
            let result =
                validator.validate_entry(ArchiveEntry::new(i, &format!("f{i}.js"), false, 1));
            prop_assert!(
                matches!(result, Err(BundleError::TooManyFiles { .. })),
                "entry {i} accepted with max {max}"
            );
        }
    }

    /// A file can never also serve as a parent directory, whichever comes first.
    #[test]
    fn prop_file_parent_clash_rejected(
        parent in prop::collection::vec("[a-z]{1,8}", 1..4),
        child in "[a-z]{1,8}\\.js",
        file_first in any::<bool>()
    ) {
        let policy = BundlePolicy::default();
        let mut validator = EntryValidator::new(&policy);
        let parent = parent.join("/");
        let nested = format!("{parent}/{child}");
        let (first, second) = if file_first {
            (parent.as_str(), nested.as_str())
        } else {
            (nested.as_str(), parent.as_str())
        };

        prop_assert!(validator.validate_entry(ArchiveEntry::new(0, first, false, 1)).is_ok());
        let result = validator.validate_entry(ArchiveEntry::new(1, second, false, 1));
        prop_assert!(
            matches!(result, Err(BundleError::PathTraversal { .. })),
            "{second} accepted after {first}"
        );
    }

    /// A root `index.html` always wins over nested ones.
    #[test]
    fn prop_root_index_wins(
        folders in prop::collection::vec("[a-z]{1,8}", 0..5),
        position in 0usize..6
    ) {
        let mut paths: Vec<String> = folders.iter().map(|f| format!("{f}/index.html")).collect();
        paths.insert(position.min(paths.len()), "index.html".to_string());
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();

        let doc = locate_entry_document(&refs).unwrap();
        prop_assert_eq!(doc.path, "index.html");
    }

    /// Resolving any mix of segments either stays inside the root or fails.
    #[test]
    fn prop_resolve_never_escapes(
        segments in prop::collection::vec(
            prop_oneof![
                Just("..".to_string()),
                Just(".".to_string()),
                Just("css".to_string()),
                Just("index.html".to_string()),
                "[a-z]{1,6}",
            ],
            0..6
        )
    ) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("bundle");
        fs::create_dir_all(root.join("css")).unwrap();
        fs::write(root.join("index.html"), b"x").unwrap();
        fs::write(root.join("css/index.html"), b"x").unwrap();
        fs::write(temp.path().join("index.html"), b"outside").unwrap();

        let requested = segments.join("/");
        let canonical_root = root.canonicalize().unwrap();
        match resolve_bundle_file(&root, &requested) {
            Ok(file) => prop_assert!(file.path().starts_with(&canonical_root), "{requested}"),
            Err(BundleError::PathEscapesRoot { .. }
                | BundleError::FileNotFound { .. }
                | BundleError::IsDirectory { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error for {requested}: {other}"),
        }
    }
}

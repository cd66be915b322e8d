//! Integration tests for htmlbundle-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use htmlbundle_core::test_utils::ZipTestBuilder;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn htmlbundle_cmd() -> Command {
    cargo_bin_cmd!("htmlbundle")
}

fn write_zip(temp: &TempDir, name: &str, builder: ZipTestBuilder) -> PathBuf {
    let path = temp.path().join(name);
    builder.write_to(&path).expect("failed to write archive");
    path
}

fn site_zip(temp: &TempDir) -> PathBuf {
    write_zip(
        temp,
        "site.zip",
        ZipTestBuilder::new()
            .add_directory("site/")
            .add_file("site/index.html", b"<!doctype html><h1>hi</h1>")
            .add_deflated_file("site/app.js", b"console.log('hi')"),
    )
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("failed to run htmlbundle");
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_version_flag() {
    htmlbundle_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("htmlbundle"));
}

#[test]
fn test_help_flag() {
    htmlbundle_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("HTML bundle"));
}

#[test]
fn test_extract_help() {
    htmlbundle_cmd()
        .args(["extract", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-total-size"))
        .stdout(predicate::str::contains("--forbid"));
}

#[test]
fn test_extract_single_folder_bundle() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);
    let dest = temp.path().join("out");

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"))
        .stdout(predicate::str::contains("Relative root:   site"));

    assert!(dest.join("site/index.html").is_file());
    assert_eq!(
        fs::read(dest.join("site/app.js")).unwrap(),
        b"console.log('hi')"
    );
}

#[test]
fn test_extract_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);

    let value = json_stdout(
        htmlbundle_cmd()
            .arg("--json")
            .arg("extract")
            .arg(&archive)
            .arg(temp.path().join("out")),
    );

    assert_eq!(value["operation"], "extract");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["relative_bundle_root"], "site");
    assert_eq!(value["data"]["strategy"], "single-top-level-folder");
    assert_eq!(value["data"]["files_extracted"], 2);
}

#[test]
fn test_extract_rejects_traversal() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_zip(
        &temp,
        "evil.zip",
        ZipTestBuilder::new()
            .add_file("index.html", b"x")
            .add_file("../../evil.sh.txt", b"owned"),
    );
    let dest = temp.path().join("out");

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATH_TRAVERSAL"))
        .stderr(predicate::str::contains("HINT"));

    assert!(fs::read_dir(&dest).map_or(true, |mut d| d.next().is_none()));
}

#[test]
fn test_extract_max_files_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .args(["--max-files", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too many files"))
        .stderr(predicate::str::contains("--max-files"));
}

#[test]
fn test_extract_forbid_flag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);

    let value = json_stdout(
        htmlbundle_cmd()
            .args(["--json", "extract"])
            .arg(&archive)
            .arg(temp.path().join("out"))
            .args(["--forbid", "JS"]),
    );
    assert_eq!(value["status"], "error");
    assert!(
        value["error"]
            .as_str()
            .unwrap()
            .contains("FORBIDDEN_FILE_TYPE")
    );
}

#[test]
fn test_extract_policy_file() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);
    let policy = temp.path().join("policy.toml");
    fs::write(&policy, "max_total_bytes = 10\n").unwrap();

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .arg("--policy")
        .arg(&policy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("BUNDLE_TOO_LARGE"));

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .arg("--policy")
        .arg(&policy)
        .args(["--max-total-size", "1K"])
        .assert()
        .success();
}

#[test]
fn test_extract_bad_policy_file() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);
    let policy = temp.path().join("policy.toml");
    fs::write(&policy, "max_archive_size = 10\n").unwrap();

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .arg("--policy")
        .arg(&policy)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid policy file"));
}

#[test]
fn test_extract_missing_entry_document() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_zip(
        &temp,
        "noindex.zip",
        ZipTestBuilder::new().add_file("main.html", b"x"),
    );

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no index.html"));
}

#[test]
fn test_extract_not_a_zip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("fake.zip");
    fs::write(&archive, b"this is not a zip archive").unwrap();

    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_ARCHIVE"));
}

#[test]
fn test_inspect_writes_nothing() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);

    let value = json_stdout(htmlbundle_cmd().args(["--json", "inspect"]).arg(&archive));
    assert_eq!(value["operation"], "inspect");
    assert_eq!(value["data"]["entry_document"], "site/index.html");
    assert_eq!(value["data"]["file_count"], 2);
    assert_eq!(value["data"]["entries"].as_array().unwrap().len(), 3);

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_inspect_human_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);

    htmlbundle_cmd()
        .arg("inspect")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bundle is valid"))
        .stdout(predicate::str::contains("site/index.html"));
}

#[test]
fn test_resolve_prints_headers() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);
    let dest = temp.path().join("out");
    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success();

    htmlbundle_cmd()
        .arg("resolve")
        .arg(dest.join("site"))
        .arg("app.js")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content-Type: application/javascript"))
        .stdout(predicate::str::contains("Content-Length: 17"))
        .stdout(predicate::str::contains(
            "Cache-Control: max-age=31536000, immutable",
        ))
        .stdout(predicate::str::contains("X-Content-Type-Options: nosniff"))
        .stdout(predicate::str::contains("X-Frame-Options: SAMEORIGIN"));
}

#[test]
fn test_resolve_rejects_escape() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);
    let dest = temp.path().join("out");
    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success();

    htmlbundle_cmd()
        .arg("resolve")
        .arg(dest.join("site"))
        .arg("../../site.zip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATH_ESCAPES_ROOT"));

    htmlbundle_cmd()
        .arg("resolve")
        .arg(&dest)
        .arg("site")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IS_DIRECTORY"));
}

#[test]
fn test_cat_streams_file() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);
    let dest = temp.path().join("out");
    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success();

    htmlbundle_cmd()
        .arg("cat")
        .arg(dest.join("site"))
        .arg("index.html")
        .assert()
        .success()
        .stdout("<!doctype html><h1>hi</h1>");
}

#[test]
fn test_cat_missing_file() {
    let temp = TempDir::new().expect("failed to create temp dir");

    htmlbundle_cmd()
        .arg("cat")
        .arg(temp.path())
        .arg("nope.css")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("FILE_NOT_FOUND"));
}

#[test]
fn test_cleanup_removes_bundle() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);
    let dest = temp.path().join("out");
    htmlbundle_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success();

    let value = json_stdout(htmlbundle_cmd().args(["--json", "cleanup"]).arg(&dest));
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["removed"], true);
    assert!(!dest.exists());

    // Removing again is not an error.
    htmlbundle_cmd().arg("cleanup").arg(&dest).assert().success();
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = site_zip(&temp);

    htmlbundle_cmd()
        .arg("--quiet")
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_completion_bash() {
    htmlbundle_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("htmlbundle"));
}

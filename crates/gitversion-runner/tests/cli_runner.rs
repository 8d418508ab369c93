//! Integration tests running a stand-in GitVersion executable.
#![cfg(unix)]

use gitversion_runner::{compute_version, GitVersionCli, VersionResult, VersionTool};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write an executable shell script that answers like GitVersion.
fn fake_gitversion(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("gitversion");
    let script = format!(
        r#"#!/bin/sh
case "$2" in
  json) cat <<'JSON'
{json}
JSON
  ;;
  buildserver) echo "published" >> "{marker}" ;;
  *) echo "5.12.0" ;;
esac
"#,
        json = json,
        marker = dir.join("published.txt").display()
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn setup(json: &str) -> (TempDir, GitVersionCli) {
    let dir = tempfile::tempdir().unwrap();
    let exe = fake_gitversion(dir.path(), json);
    let cli = GitVersionCli::new(exe, dir.path());
    (dir, cli)
}

/// Test: version check succeeds and reports the tool version
#[test]
fn test_version_check_reports_tool_version() {
    let (_dir, cli) = setup("{}");
    assert!(cli.is_supported());
    assert_eq!(cli.tool_version().unwrap(), "5.12.0");
}

/// Test: query mode parses the structured result
#[test]
fn test_query_and_compute() {
    let (_dir, cli) = setup(r#"{"MajorMinorPatch":"3.1.0","LegacySemVerPadded":"3.1.0-rc0002"}"#);
    let result = compute_version(&cli, true).expect("complete result");
    assert_eq!(result, VersionResult::new("3.1.0", "3.1.0-rc0002"));
}

/// Test: CI builds publish metadata before querying
#[test]
fn test_ci_build_publishes_metadata() {
    let (dir, cli) = setup(r#"{"MajorMinorPatch":"3.1.0","LegacySemVerPadded":"3.1.0"}"#);
    compute_version(&cli, false).expect("complete result");
    let marker = std::fs::read_to_string(dir.path().join("published.txt")).unwrap();
    assert!(marker.contains("published"));
}

/// Test: local builds never publish metadata
#[test]
fn test_local_build_skips_publish() {
    let (dir, cli) = setup(r#"{"MajorMinorPatch":"3.1.0","LegacySemVerPadded":"3.1.0"}"#);
    compute_version(&cli, true).expect("complete result");
    assert!(!dir.path().join("published.txt").exists());
}

/// Test: output lacking the padded version signals fallback
#[test]
fn test_incomplete_output_falls_back() {
    let (_dir, cli) = setup(r#"{"MajorMinorPatch":"3.1.0","FullSemVer":"3.1.0+7"}"#);
    assert!(compute_version(&cli, true).is_none());
}

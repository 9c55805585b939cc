//! CLI integration tests for the headnum binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const DOC: &str = "# Intro\n\n## 7.3. Goals\n\n### Detail\n\n# Outlook\n";

#[test]
fn test_number_rewrites_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let doc = temp_dir.path().join("doc.md");
    fs::write(&doc, DOC).unwrap();

    Command::cargo_bin("headnum")
        .unwrap()
        .current_dir(temp_dir.path())
        .arg("number")
        .arg(&doc)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&doc).unwrap(),
        "# 1. Intro\n\n## 1.1. Goals\n\n### 1.1.1. Detail\n\n# 2. Outlook\n"
    );
}

#[test]
fn test_strip_after_number_restores_text() {
    let temp_dir = tempfile::tempdir().unwrap();
    let doc = temp_dir.path().join("doc.md");
    fs::write(&doc, DOC).unwrap();

    for subcommand in ["number", "strip"] {
        Command::cargo_bin("headnum")
            .unwrap()
            .current_dir(temp_dir.path())
            .arg(subcommand)
            .arg(&doc)
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(&doc).unwrap(),
        "# Intro\n\n## Goals\n\n### Detail\n\n# Outlook\n"
    );
}

#[test]
fn test_dry_run_leaves_file_alone() {
    let temp_dir = tempfile::tempdir().unwrap();
    let doc = temp_dir.path().join("doc.md");
    fs::write(&doc, DOC).unwrap();

    Command::cargo_bin("headnum")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["number", "--start-level", "2", "--dry-run"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1. Goals"))
        .stdout(predicate::str::contains("### 1.1. Detail"))
        .stdout(predicate::str::contains("# Intro\n"));

    assert_eq!(fs::read_to_string(&doc).unwrap(), DOC);
}

#[test]
fn test_outline_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("doc.md"), DOC).unwrap();
    fs::write(temp_dir.path().join("skip.txt"), "# Not markdown\n").unwrap();

    let output = Command::cargo_bin("headnum")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["outline", "--json", "."])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = parsed.as_array().unwrap();
    assert_eq!(files.len(), 1);
    let headings = files[0]["headings"].as_array().unwrap();
    assert_eq!(headings.len(), 4);
    assert_eq!(headings[1]["label"], "1.1. ");
    assert_eq!(headings[1]["text"], "Goals");
    assert_eq!(headings[1]["level"], 2);
}

#[test]
fn test_config_file_is_honoured() {
    let temp_dir = tempfile::tempdir().unwrap();
    let doc = temp_dir.path().join("doc.md");
    fs::write(&doc, "# Title\n\n## A\n").unwrap();
    fs::write(
        temp_dir.path().join("headnum.toml"),
        "include_top_level = false\n",
    )
    .unwrap();

    Command::cargo_bin("headnum")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["number", "doc.md"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&doc).unwrap(), "# Title\n\n## 1. A\n");
}

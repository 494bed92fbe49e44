//! End-to-end tests for the `folio` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const ROOT_DOC: &str = r#"{
  "type": "PORTFOLIO",
  "name": "Root",
  "children": [
    [{"type": "EQUITY", "ticker": "AAA"}, "0.5"],
    [{"type": "PORTFOLIO", "name": "Sub", "children": [
      [{"type": "EQUITY", "ticker": "BBB"}, "1"]
    ]}, "0.5"]
  ]
}"#;

fn write_doc(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn folio() -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("FOLIO_CONFIG");
    cmd
}

#[test]
fn test_show() {
    let doc = write_doc(ROOT_DOC);
    folio()
        .arg("show")
        .arg(doc.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Allocation(name='Root', children={\n    Instrument(ticker='AAA'): 0.5\n",
        ));
}

#[test]
fn test_show_with_config_indent() {
    let doc = write_doc(ROOT_DOC);
    let config = write_doc("[render]\nindent_width = 4\n");
    folio()
        .arg("--config")
        .arg(config.path())
        .arg("show")
        .arg(doc.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\n        Instrument(ticker='AAA'): 0.5\n",
        ));
}

#[test]
fn test_flatten_table() {
    let doc = write_doc(ROOT_DOC);
    folio()
        .arg("flatten")
        .arg(doc.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Root/AAA"))
        .stdout(predicate::str::contains("Root/Sub/BBB"))
        .stdout(predicate::str::contains("50.00%"));
}

#[test]
fn test_flatten_json() {
    let doc = write_doc(ROOT_DOC);
    let output = folio()
        .args(["--format", "json", "flatten"])
        .arg(doc.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let flat: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        flat,
        serde_json::json!({"Root/AAA": "0.5", "Root/Sub/BBB": "0.5"})
    );
}

#[test]
fn test_flatten_requires_allocation() {
    let doc = write_doc(r#"{"type": "EQUITY", "ticker": "AAA"}"#);
    folio()
        .arg("flatten")
        .arg(doc.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid node type EQUITY"));
}

#[test]
fn test_validate_from_stdin() {
    folio()
        .args(["--format", "minimal", "validate", "-"])
        .write_stdin(ROOT_DOC)
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn test_validate_json_summary() {
    let doc = write_doc(ROOT_DOC);
    let output = folio()
        .args(["--format", "json", "validate"])
        .arg(doc.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["root"], "Root");
    assert_eq!(summary["depth"], 3);
    assert_eq!(summary["leaf_positions"], 2);
}

#[test]
fn test_validate_rejects_bad_sum() {
    let doc = write_doc(
        r#"{"type": "PORTFOLIO", "name": "Short", "children": [
            [{"type": "EQUITY", "ticker": "A"}, "0.4"],
            [{"type": "EQUITY", "ticker": "B"}, "0.5"]
        ]}"#,
    );
    folio()
        .arg("validate")
        .arg(doc.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("sum to 0.9"));
}

#[test]
fn test_validate_rejects_unknown_type() {
    let doc = write_doc(r#"{"type": "BOND", "ticker": "T"}"#);
    folio()
        .arg("validate")
        .arg(doc.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("BOND"));
}

#[test]
fn test_validate_rejects_non_json() {
    folio()
        .args(["validate", "-"])
        .write_stdin("portfolio: yes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_leaves() {
    let doc = write_doc(ROOT_DOC);
    folio()
        .args(["--format", "minimal", "leaves"])
        .arg(doc.path())
        .assert()
        .success()
        .stdout("AAA\nBBB\n");
}

#[test]
fn test_exposure() {
    let doc = write_doc(
        r#"{"type": "PORTFOLIO", "name": "Root", "children": [
            [{"type": "EQUITY", "ticker": "AAA"}, "0.5"],
            [{"type": "PORTFOLIO", "name": "Sub", "children": [
                [{"type": "EQUITY", "ticker": "AAA"}, "0.5"],
                [{"type": "EQUITY", "ticker": "BBB"}, "0.5"]
            ]}, "0.5"]
        ]}"#,
    );
    folio()
        .args(["--format", "minimal", "exposure", "--by-share"])
        .arg(doc.path())
        .assert()
        .success()
        .stdout("AAA 0.75\nBBB 0.25\n");
}

#[test]
fn test_lookup_share() {
    let doc = write_doc(ROOT_DOC);
    folio()
        .args(["--format", "minimal", "lookup"])
        .arg(doc.path())
        .arg("Sub/BBB")
        .assert()
        .success()
        .stdout("0.5\n");
}

#[test]
fn test_lookup_missing_path() {
    let doc = write_doc(ROOT_DOC);
    folio()
        .arg("lookup")
        .arg(doc.path())
        .arg("Sub/ZZZ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No node at path 'Sub/ZZZ'"));
}

#[test]
fn test_lookup_below_instrument() {
    let doc = write_doc(ROOT_DOC);
    folio()
        .arg("lookup")
        .arg(doc.path())
        .arg("AAA/deeper")
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no children"));
}

#[test]
fn test_encode_round_trip() {
    let doc = write_doc(ROOT_DOC);
    let output = folio().arg("encode").arg(doc.path()).output().unwrap();
    assert!(output.status.success());

    let encoded = String::from_utf8(output.stdout).unwrap();
    let original: serde_json::Value = serde_json::from_str(ROOT_DOC).unwrap();
    let reencoded: serde_json::Value = serde_json::from_str(encoded.trim()).unwrap();
    assert_eq!(reencoded, original);
    assert_eq!(encoded.trim().lines().count(), 1);
}

#[test]
fn test_missing_input_file() {
    folio()
        .args(["show", "/nonexistent/tree.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read /nonexistent/tree.json"));
}

// End-to-end checks of the braq binary.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;
use predicates::prelude::PredicateBooleanExt;

fn script(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("braq-cli-{}", name));
    fs::write(&path, contents).unwrap();
    path
}

fn braq() -> Command {
    Command::cargo_bin("braq").unwrap()
}

#[test]
fn run_prints_output_then_the_result() {
    let path = script("run-ok.braq", "[begin [print \"hi\"] [* 6 7]]");
    braq()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("hi").and(contains("42")));
    let _ = fs::remove_file(path);
}

#[test]
fn run_renders_sequences_bracketed_and_indented() {
    let path = script("run-seq.braq", "[| 1 [| 2 |] |]");
    braq()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("[\n  1\n  [\n    2\n  ]\n]"));
    let _ = fs::remove_file(path);
}

#[test]
fn run_reports_evaluation_errors_with_diagnostics() {
    let path = script("run-bad.braq", "[boom 1]");
    braq()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("undefined symbol").and(contains("boom")));
    let _ = fs::remove_file(path);
}

#[test]
fn check_accepts_balanced_scripts() {
    let path = script("check-ok.braq", "# header\n[a [b \"c\"] 1.5]");
    braq()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("ok"));
    let _ = fs::remove_file(path);
}

#[test]
fn check_rejects_unbalanced_brackets() {
    let path = script("check-bad.braq", "[a [b");
    braq()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(contains("malformed input"));
    let _ = fs::remove_file(path);
}

#[test]
fn ast_prints_the_canonical_form() {
    let path = script("ast.braq", "[ +   1\n 2 ]");
    braq()
        .arg("ast")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("[+ 1 2]"));
    let _ = fs::remove_file(path);
}

#[test]
fn ast_json_emits_serialized_nodes() {
    let path = script("ast-json.braq", "[+ 1 2]");
    braq()
        .arg("ast")
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .stdout(contains("List").and(contains("Symbol")));
    let _ = fs::remove_file(path);
}

#[test]
fn tokens_lists_positions_and_texts() {
    let path = script("tokens.braq", "[x := 5]");
    braq()
        .arg("tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains(":=").and(contains("0:0")));
    let _ = fs::remove_file(path);
}

#[test]
fn missing_files_fail_cleanly() {
    braq()
        .arg("run")
        .arg("definitely-not-here.braq")
        .assert()
        .failure();
}

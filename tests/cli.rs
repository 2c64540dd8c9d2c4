//! CLI behavior tests: exit codes, output formats, usage errors.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const CONTRACT_OK: &str = "tests/fixtures/contract_ok.test.ts";
const HAPPY_PATH: &str = "tests/fixtures/happy_path.test.ts";
const WEAK_RESPONSE: &str = "tests/fixtures/weak_response.test.ts";
const TRIVIAL: &str = "tests/fixtures/trivial.test.ts";
const POST_IN_COMMENT: &str = "tests/fixtures/post_in_comment.test.ts";
const PYTEST: &str = "tests/fixtures/test_health.py";

fn semtest_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_semtest"))
}

fn json_for(path: &str) -> (i32, serde_json::Value) {
    let output = semtest_cmd()
        .arg(path)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed = serde_json::from_str(s.trim()).expect("valid JSON");
    (output.status.code().unwrap(), parsed)
}

#[test]
fn no_args_prints_usage_exit_2() {
    semtest_cmd()
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn file_not_found_exit_2() {
    semtest_cmd()
        .arg("nonexistent.test.ts")
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Test file not found").and(predicate::str::contains("nonexistent.test.ts")));
}

#[test]
fn clean_file_exit_0_with_success_line() {
    semtest_cmd()
        .arg(CONTRACT_OK)
        .assert()
        .success()
        .stdout(predicate::str::contains("All semantic checks passed"))
        .stdout(predicate::str::contains("Semantic Validation Results").not());
}

#[test]
fn critical_findings_exit_1() {
    semtest_cmd()
        .arg(TRIVIAL)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Semantic Validation Results: tests/fixtures/trivial.test.ts"))
        .stdout(predicate::str::contains("CRITICAL ISSUES (3):"))
        .stdout(predicate::str::contains(
            "  - [trivial_assertion] (line 3): Trivial assertion found: expect(true).toBe(true);",
        ))
        .stdout(predicate::str::contains("  - [contract_reference]: Test does not reference"))
        .stdout(predicate::str::contains("WARNINGS (1):"));
}

#[test]
fn warnings_only_exit_2_without_stderr() {
    semtest_cmd()
        .arg(HAPPY_PATH)
        .assert()
        .code(2)
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("[error_coverage]"));
}

#[test]
fn info_only_exit_0_with_banner() {
    semtest_cmd()
        .arg(WEAK_RESPONSE)
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO (1):"))
        .stdout(predicate::str::contains("[response_validation]"));
}

#[test]
fn json_output_shape() {
    let (code, parsed) = json_for(TRIVIAL);
    assert_eq!(code, 1);
    assert_eq!(parsed["file"], TRIVIAL);
    assert_eq!(parsed["critical_count"], 3);
    assert_eq!(parsed["warning_count"], 1);

    let issues = parsed["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 4);
    assert_eq!(issues[0]["check"], "trivial_assertion");
    assert_eq!(issues[0]["line"], 3);
    assert_eq!(issues[1]["line"], 7);
    assert_eq!(issues[2]["check"], "contract_reference");
    assert!(issues[2]["line"].is_null());
    assert_eq!(issues[3]["severity"], "WARNING");
}

#[test]
fn json_counts_match_issues() {
    for path in [CONTRACT_OK, HAPPY_PATH, WEAK_RESPONSE, TRIVIAL, POST_IN_COMMENT, PYTEST] {
        let (_, parsed) = json_for(path);
        let issues = parsed["issues"].as_array().unwrap();
        let count = |sev: &str| issues.iter().filter(|i| i["severity"] == sev).count() as u64;
        assert_eq!(parsed["critical_count"], count("CRITICAL"), "{}", path);
        assert_eq!(parsed["warning_count"], count("WARNING"), "{}", path);
    }
}

#[test]
fn post_mentioned_in_comment_is_reported() {
    let (code, parsed) = json_for(POST_IN_COMMENT);
    assert_eq!(code, 2);
    let issues = parsed["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["check"], "http_method_coverage");
    assert_eq!(issues[0]["message"], "HTTP methods declared but not tested: POST");
}

#[test]
fn python_test_file_is_supported() {
    let (code, parsed) = json_for(PYTEST);
    assert_eq!(code, 1);
    assert_eq!(parsed["issues"][0]["check"], "trivial_assertion");
    assert_eq!(parsed["issues"][0]["line"], 5);
}

#[test]
fn unknown_format_falls_back_to_text() {
    semtest_cmd()
        .arg(CONTRACT_OK)
        .arg("--format")
        .arg("yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All semantic checks passed"));
}

#[test]
fn json_exit_code_matches_text_exit_code() {
    for (path, expected) in [(CONTRACT_OK, 0), (TRIVIAL, 1), (HAPPY_PATH, 2)] {
        let (code, _) = json_for(path);
        assert_eq!(code, expected, "{}", path);
        semtest_cmd().arg(path).assert().code(expected);
    }
}

#[test]
fn empty_file_exit_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("empty.test.ts");
    fs::write(&path, "").unwrap();

    let output = semtest_cmd()
        .arg(&path)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    let checks: Vec<&str> = parsed["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["check"].as_str().unwrap())
        .collect();
    assert_eq!(checks, vec!["contract_reference", "response_validation"]);
}

#[test]
fn config_next_to_file_is_applied() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("empty.test.ts");
    fs::write(&path, "").unwrap();
    fs::write(
        dir.path().join(".semtestrc.json"),
        r#"{ "checks": { "contract_reference": "off", "response_validation": "info" } }"#,
    )
    .unwrap();

    semtest_cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO (1):"));
}

#[test]
fn bare_format_flag_falls_back_to_text() {
    semtest_cmd()
        .arg(TRIVIAL)
        .arg("--format")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CRITICAL ISSUES (3):"));
}

#[test]
fn broken_discovered_config_does_not_abort() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join(".semtestrc.json"), "{ oops").unwrap();
    let tests_dir = dir.path().join("tests");
    fs::create_dir_all(&tests_dir).unwrap();
    let path = tests_dir.join("t.test.ts");
    fs::write(&path, "expect(true).toBe(true);\n").unwrap();

    let output = semtest_cmd()
        .arg(&path)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(parsed["issues"][0]["check"], "trivial_assertion");
    assert_eq!(parsed["issues"][0]["line"], 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ignoring unusable config"), "{}", stderr);
}

#[test]
fn ignore_comment_cannot_silence_trivial_assertion() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("users.test.ts");
    fs::write(
        &path,
        "import { UserSchema } from './schemas';\nexpect(true).toBe(true); // semtest-ignore\nexpect(response).toHaveProperty('id');\n",
    )
    .unwrap();

    let output = semtest_cmd()
        .arg(&path)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(parsed["critical_count"], 1);
    assert_eq!(parsed["issues"][0]["check"], "trivial_assertion");
    assert_eq!(parsed["issues"][0]["line"], 2);
}

#[test]
fn explicit_config_missing_exit_2() {
    semtest_cmd()
        .arg(CONTRACT_OK)
        .arg("--config")
        .arg("does-not-exist.json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn no_color_output_is_plain() {
    semtest_cmd()
        .arg(TRIVIAL)
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\u{1b}[").not());
}

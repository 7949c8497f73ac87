// contactguard/tests/cli_integration_tests.rs
//! End-to-end tests of the contactguard binary: `sanitize`, `scan` and
//! `rules`, with stdin and file input, user rule files and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const PLACEHOLDER: &str = "[Contact details removed. Continue discussion after acceptance.]";

/// A command isolated from any rules file on the host.
fn contactguard() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("contactguard"));
    cmd.env_remove("CONTACTGUARD_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--no-user-config");
    cmd
}

fn write_rules_file(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("rules.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_sanitize_stdin_to_stdout() {
    contactguard()
        .arg("sanitize")
        .write_stdin("Contact me at test@example.com for details.")
        .assert()
        .success()
        .stdout(format!("Contact me at {} for details.", PLACEHOLDER));
}

#[test]
fn test_clean_input_is_byte_identical() {
    let input = "Hello, I am interested in your services.\nBudget is $1,299.99 for 2024.\n";
    contactguard()
        .arg("sanitize")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn test_sanitize_file_to_file_with_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_path = dir.path().join("in.txt");
    let output_path = dir.path().join("out.txt");
    fs::write(&input_path, "Lets chat on WhatsApp or Telegram, or call 555-123-4567")?;

    contactguard()
        .args(["sanitize", "--summary", "-i"])
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("platform_keyword (keyword): 2"))
        .stderr(predicate::str::contains("phone_number (phone): 1"))
        .stderr(predicate::str::contains("555-123-4567").not());

    let out = fs::read_to_string(&output_path)?;
    assert_eq!(out.matches(PLACEHOLDER).count(), 3);
    assert!(!out.contains("555"));
    Ok(())
}

#[test]
fn test_line_buffered_sanitization() {
    contactguard()
        .args(["sanitize", "--line-buffered"])
        .write_stdin("first line\nping @someuser\nmail a@b.com\n")
        .assert()
        .success()
        .stdout(format!("first line\nping {0}\nmail {0}\n", PLACEHOLDER));
}

#[test]
fn test_quiet_suppresses_info_messages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output_path = dir.path().join("out.txt");
    contactguard()
        .args(["--quiet", "sanitize", "-o"])
        .arg(&output_path)
        .write_stdin("hello")
        .assert()
        .success()
        .stderr("");
    assert_eq!(fs::read_to_string(&output_path)?, "hello");
    Ok(())
}

#[test]
fn test_disable_rule_keeps_that_category() {
    contactguard()
        .args(["sanitize", "--disable", "social_handle"])
        .write_stdin("Check my IG @instastar")
        .assert()
        .success()
        .stdout("Check my IG @instastar");
}

#[test]
fn test_user_rules_file_adds_keywords_and_rules() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = write_rules_file(
        &dir,
        r#"
keywords:
  - kik
rules:
  - name: wa_link
    category: keyword
    pattern: "\\bwa\\.me/\\S+"
"#,
    );

    contactguard()
        .arg("--config")
        .arg(&config)
        .arg("sanitize")
        .write_stdin("kik me or open wa.me/123")
        .assert()
        .success()
        .stdout(format!("{0} me or open {0}", PLACEHOLDER));
    Ok(())
}

#[test]
fn test_config_from_environment_variable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = write_rules_file(&dir, "placeholder: \"[removed]\"\n");

    contactguard()
        .env("CONTACTGUARD_CONFIG", &config)
        .arg("sanitize")
        .write_stdin("ping @someuser")
        .assert()
        .success()
        .stdout("ping [removed]");
    Ok(())
}

#[test]
fn test_placeholder_that_would_match_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = write_rules_file(&dir, "placeholder: \"[call 555-123-4567]\"\n");

    contactguard()
        .arg("--config")
        .arg(&config)
        .arg("sanitize")
        .write_stdin("hello")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn test_invalid_rules_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = write_rules_file(
        &dir,
        "rules:\n  - name: broken\n    category: phone\n    pattern: \"([unclosed\"\n",
    );

    contactguard()
        .arg("--config")
        .arg(&config)
        .arg("rules")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken"));
    Ok(())
}

#[test]
fn test_missing_input_file_is_an_error() {
    contactguard()
        .args(["sanitize", "-i", "/definitely/not/here.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("/definitely/not/here.txt"));
}

#[test]
fn test_scan_reports_without_rewriting() {
    contactguard()
        .arg("scan")
        .write_stdin("mail jane@example.com or ping @janedoe")
        .assert()
        .success()
        .stdout(predicate::str::contains("email_address (email): 1"))
        .stdout(predicate::str::contains("social_handle (social_handle): 1"))
        .stdout(predicate::str::contains("total: 2"))
        .stdout(predicate::str::contains("jane@example.com").not());
}

#[test]
fn test_scan_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let output = contactguard()
        .args(["scan", "--json"])
        .write_stdin("call 555-123-4567 or WhatsApp")
        .output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["total_findings"], 2);
    assert_eq!(report["findings"][0]["category"], "phone");
    assert_eq!(report["findings"][0]["pass"], 0);
    assert_eq!(report["findings"][0]["round"], 0);
    assert_eq!(report["findings"][1]["category"], "keyword");
    assert!(report["findings"][0]["sample_hash"].is_string());
    assert!(!String::from_utf8(output.stdout)?.contains("555-123-4567"));
    Ok(())
}

#[test]
fn test_scan_fail_over_threshold() {
    contactguard()
        .args(["scan", "--fail-over-threshold", "1"])
        .write_stdin("WhatsApp, Telegram and Discord")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("over the threshold of 1"));

    contactguard()
        .args(["scan", "--fail-over-threshold", "3"])
        .write_stdin("WhatsApp, Telegram and Discord")
        .assert()
        .success();
}

#[test]
fn test_scan_clean_input() {
    contactguard()
        .arg("scan")
        .write_stdin("Deadline is 2024-03-15.")
        .assert()
        .success()
        .stdout("No contact details found.\n");
}

#[test]
fn test_rules_lists_pipeline_in_order() {
    contactguard()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. phone_number [phone]"))
        .stdout(predicate::str::contains(" 2. email_address [email]"))
        .stdout(predicate::str::contains(" 3. platform_keyword [keyword]"))
        .stdout(predicate::str::contains(" 4. social_handle [social_handle]"));
}

#[test]
fn test_rules_json_honors_enable_disable() -> Result<(), Box<dyn std::error::Error>> {
    let output = contactguard()
        .args(["rules", "--json", "-x", "platform_keyword"])
        .output()?;
    assert!(output.status.success());

    let table: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(table["placeholder"], PLACEHOLDER);
    let names: Vec<&str> = table["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["phone_number", "email_address", "social_handle"]);
    Ok(())
}

#[test]
fn test_no_arguments_prints_help() {
    Command::new(assert_cmd::cargo_bin!("contactguard"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// fieldrules/tests/cli_integration_tests.rs
//! End-to-end tests of the `fieldrules` binary.
//!
//! stdout is never a terminal here, so output carries no ANSI colour codes.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn fieldrules() -> Command {
    let mut cmd = Command::cargo_bin("fieldrules").unwrap();
    cmd.env_remove("FIELDRULES_RULES");
    cmd.env("RUST_LOG", "debug");
    cmd
}

#[test]
fn test_sanitise_single_value() {
    fieldrules()
        .args(["sanitise", "mobilephone", "04a12-345.678"])
        .assert()
        .success()
        .stdout("0412345678\n");
}

#[test]
fn test_sanitise_hyphen_leading_value() {
    fieldrules()
        .args(["sanitise", "money", "-$1,234.5"])
        .assert()
        .success()
        .stdout("1234.5\n");
}

#[test]
fn test_sanitise_reads_stdin_lines() {
    fieldrules()
        .args(["sanitise", "postcode"])
        .write_stdin("2O01x\n 3000 \n")
        .assert()
        .success()
        .stdout("2001\n3000\n");
}

#[test]
fn test_validate_exit_codes() {
    fieldrules()
        .args(["validate", "email", "dale.smith@mail.com.au"])
        .assert()
        .success()
        .stdout("valid: dale.smith@mail.com.au\n");

    fieldrules()
        .args(["validate", "money", "12.5"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("invalid: 12.5 (Please enter a valid dollar amount)"));
}

#[test]
fn test_validate_after_sanitising() {
    fieldrules()
        .args(["validate", "--sanitise", "anyphone"])
        .write_stdin("(02) 9876 5432\n0612345678\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("valid: 0298765432\n"))
        .stdout(predicate::str::contains(
            "invalid: 0612345678 (Please enter a valid Australian phone number)",
        ));
}

#[test]
fn test_unknown_field_type() {
    fieldrules()
        .args(["validate", "shoesize", "42"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("error: Unknown field type 'shoesize'"));
}

#[test]
fn test_list_and_show() -> Result<()> {
    let output = fieldrules().arg("list").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.lines().count(), 15);
    assert!(stdout.starts_with("anyphone"));
    assert!(stdout.contains("Dollar amount"));

    let output = fieldrules().args(["show", "percent", "--json"]).output()?;
    assert!(output.status.success());
    let descriptor: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(descriptor["key"], "percent");
    assert_eq!(descriptor["post_icon"], "percent");
    assert_eq!(descriptor["error"], "Please enter a valid percentage");

    fieldrules()
        .args(["show", "name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("error: Please enter a name"));
    Ok(())
}

#[test]
fn test_format_phone() {
    fieldrules()
        .arg("format-phone")
        .write_stdin("0412345678\n(02) 9876 5432\n")
        .assert()
        .success()
        .stdout("0412 345 678\n02 9876 5432\n");
}

#[test]
fn test_rules_override_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(
        br#"
locale: en-NZ
rules:
  - key: postcode
    description: New Zealand post code
    pattern: '^[0-9]{4}$'
    error: Please enter a valid New Zealand post code
    sanitiser:
      kind: digits
      max_length: 4
"#,
    )?;

    fieldrules()
        .args(["validate", "postcode", "0110", "--rules"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("valid: 0110\n")
        .stderr(predicate::str::contains("Using 15 field rules with overrides from"));

    fieldrules()
        .args(["--quiet", "validate", "postcode", "0110"])
        .env("FIELDRULES_RULES", file.path())
        .assert()
        .success()
        .stderr("");

    fieldrules()
        .args(["validate", "postcode", "0100"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_invalid_rules_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"rules:\n  - key: broken\n    pattern: '^[0-9'\n    error: nope\n")?;

    fieldrules()
        .args(["list", "--rules"])
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load field rules from"));
    Ok(())
}

//! End-to-end tests for the brew_packager binary

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const FORMULA_TEMPLATE: &str = "version: ${version}\nshort: ${short_version}\nsha256: ${checksum}";

fn packager() -> Command {
    let mut cmd = Command::new(cargo_bin!("brew_packager"));
    cmd.env_remove("RUST_LOG")
        .env_remove("BREW_PACKAGER_LOGGING_LEVEL")
        .env_remove("BREW_PACKAGER_LOGGING_FORMAT");
    cmd
}

#[test]
fn test_generates_formula() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    fs::write(&template, FORMULA_TEMPLATE).unwrap();

    packager()
        .current_dir(temp.path())
        .arg(&template)
        .arg(&output)
        .args(["v2.0.0", "abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Metadata:"))
        .stdout(predicate::str::contains("* version: v2.0.0"))
        .stdout(predicate::str::contains("* short_version: 2.0.0"))
        .stdout(predicate::str::contains("* checksum: abc123"))
        .stdout(predicate::str::contains("Generated"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "version: v2.0.0\nshort: 2.0.0\nsha256: abc123"
    );
}

#[test]
fn test_missing_template_fails_without_output() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("formula.rb");

    packager()
        .current_dir(temp.path())
        .arg(temp.path().join("does-not-exist.rb.in"))
        .arg(&output)
        .args(["v1.0.0", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read template"));

    assert!(!output.exists());
}

#[test]
fn test_empty_version() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    fs::write(&template, FORMULA_TEMPLATE).unwrap();

    packager()
        .current_dir(temp.path())
        .arg(&template)
        .arg(&output)
        .args(["", "abc123"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "version: \nshort: \nsha256: abc123"
    );
}

#[test]
fn test_missing_arguments_is_usage_error() {
    packager()
        .args(["formula.rb.in", "formula.rb", "v1.0.0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("CHECKSUM"));
}

#[test]
fn test_unwritable_output_fails() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    fs::write(&template, FORMULA_TEMPLATE).unwrap();

    packager()
        .current_dir(temp.path())
        .arg(&template)
        .arg(temp.path().join("missing-dir").join("formula.rb"))
        .args(["v1.0.0", "abc123"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to write output"));
}

#[test]
fn test_strict_fails_on_unknown_placeholder() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    fs::write(&template, "url \"${url}\"\nsha256 \"${checksum}\"").unwrap();

    packager()
        .current_dir(temp.path())
        .arg("--strict")
        .arg(&template)
        .arg(&output)
        .args(["v1.0.0", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unresolved placeholders in template: url"));

    assert!(!output.exists());
}

#[test]
fn test_dry_run_prints_without_writing() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    fs::write(&template, FORMULA_TEMPLATE).unwrap();

    packager()
        .current_dir(temp.path())
        .arg("--dry-run")
        .arg(&template)
        .arg(&output)
        .args(["v3.1.4", "deadbeef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("short: 3.1.4"));

    assert!(!output.exists());
}

#[test]
fn test_bad_default_config_file_warns_and_generates() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    fs::write(&template, FORMULA_TEMPLATE).unwrap();
    fs::write(temp.path().join("brew_packager.toml"), "[logging]\nformat = \"xml\"\n").unwrap();

    packager()
        .current_dir(temp.path())
        .arg(&template)
        .arg(&output)
        .args(["v1.0.0", "abc123"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring logging configuration"))
        .stderr(predicate::str::contains("unknown logging format 'xml'"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "version: v1.0.0\nshort: 1.0.0\nsha256: abc123"
    );
}

#[test]
fn test_bad_logging_env_warns_and_generates() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    fs::write(&template, FORMULA_TEMPLATE).unwrap();

    packager()
        .current_dir(temp.path())
        .env("BREW_PACKAGER_LOGGING_FORMAT", "text")
        .arg(&template)
        .arg(&output)
        .args(["v1.0.0", "abc123"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring logging configuration"))
        .stderr(predicate::str::contains("unknown logging format 'text'"));

    assert!(output.exists());
}

#[test]
fn test_bad_explicit_config_fails() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    let config = temp.path().join("ci.toml");
    fs::write(&template, FORMULA_TEMPLATE).unwrap();
    fs::write(&config, "[logging]\nformat = \"xml\"\n").unwrap();

    packager()
        .current_dir(temp.path())
        .arg("--config")
        .arg(&config)
        .arg(&template)
        .arg(&output)
        .args(["v1.0.0", "abc123"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to load configuration"));

    assert!(!output.exists());
}

#[test]
fn test_piped_diagnostics_have_no_colour_codes() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("formula.rb.in");
    let output = temp.path().join("formula.rb");
    fs::write(&template, "url \"${url}\"\nsha256 \"${checksum}\"").unwrap();

    // The unknown placeholder forces a warning line onto stderr
    packager()
        .current_dir(temp.path())
        .arg(&template)
        .arg(&output)
        .args(["v1.0.0", "abc123"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no value for placeholder"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

//! Integration tests for the `exameets` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `exameets` binary with env isolation.
///
/// Clears all `EXAMEETS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn exameets_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("exameets");
    cmd.env("HOME", "/tmp/exameets-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/exameets-cli-test-nonexistent")
        .env("EXAMEETS_CONFIG_DIR", "/tmp/exameets-cli-test-nonexistent")
        .env_remove("EXAMEETS_URL")
        .env_remove("EXAMEETS_OUTPUT")
        .env_remove("EXAMEETS_TIMEOUT")
        .env_remove("EXAMEETS_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = exameets_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    exameets_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Exameets")
            .and(predicate::str::contains("jobs"))
            .and(predicate::str::contains("exams"))
            .and(predicate::str::contains("scholarships"))
            .and(predicate::str::contains("whats-new")),
    );
}

#[test]
fn test_version_flag() {
    exameets_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("exameets"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    exameets_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    exameets_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    exameets_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = exameets_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = exameets_cmd()
        .args(["--output", "invalid", "jobs", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_url_is_a_usage_error() {
    let output = exameets_cmd()
        .args(["--url", "not a url", "jobs", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("URL") || text.contains("url"),
        "Expected URL validation error:\n{text}"
    );
}

#[test]
fn test_create_requires_payload() {
    // Payload validation fires before any network traffic, but session
    // establishment runs first — with no backend reachable this must
    // fail either way, never panic.
    let output = exameets_cmd()
        .args(["--url", "http://127.0.0.1:9", "jobs", "create"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure");
}

#[test]
fn test_unreachable_backend_maps_to_connection_error() {
    // Port 9 (discard) refuses connections on loopback.
    let output = exameets_cmd()
        .args(["--url", "http://127.0.0.1:9", "jobs", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "Expected connection exit code");
}

// ── Config commands (no backend needed) ─────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    exameets_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api.exameets.in"));
}

#[test]
fn test_config_path_prints_a_path() {
    exameets_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_resource_subcommands_exist() {
    for section in [
        "jobs",
        "govt-jobs",
        "exams",
        "scholarships",
        "admit-cards",
        "admissions",
        "pyqs",
    ] {
        exameets_cmd()
            .args([section, "--help"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("list")
                    .and(predicate::str::contains("get"))
                    .and(predicate::str::contains("create"))
                    .and(predicate::str::contains("update"))
                    .and(predicate::str::contains("delete"))
                    .and(predicate::str::contains("latest")),
            );
    }
}

#[test]
fn test_auth_subcommands_exist() {
    exameets_cmd()
        .args(["auth", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("login")
                .and(predicate::str::contains("register"))
                .and(predicate::str::contains("logout"))
                .and(predicate::str::contains("whoami"))
                .and(predicate::str::contains("delete-account")),
        );
}

#[test]
fn test_profile_subcommands_exist() {
    exameets_cmd()
        .args(["profile", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("update")
                .and(predicate::str::contains("password"))
                .and(predicate::str::contains("preferences")),
        );
}

#[test]
fn test_section_aliases_resolve() {
    for alias in ["j", "gj", "e", "sch", "ac", "adm", "pyq"] {
        exameets_cmd().args([alias, "--help"]).assert().success();
    }
}

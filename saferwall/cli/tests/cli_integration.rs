//! Integration tests for the saferwall CLI.
//!
//! These tests verify end-to-end CLI behavior using assert_cmd. None of them
//! reach a live API.

use assert_cmd::Command;
use predicates::prelude::*;

fn saferwall_cmd() -> Command {
    let mut cmd = Command::cargo_bin("saferwall").unwrap();
    cmd.current_dir(std::env::temp_dir())
        .env_remove("PUBLIC_API_URL")
        .env_remove("SAFERWALL_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() {
    saferwall_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saferwall portal"))
        .stdout(predicate::str::contains("--api-url"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("nt-header"));
}

#[test]
fn cli_shows_version() {
    saferwall_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("saferwall 0.1.0"));
}

#[test]
fn cli_requires_api_url() {
    saferwall_cmd()
        .args(["file", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PUBLIC_API_URL"));
}

#[test]
fn cli_reports_connection_failure() {
    saferwall_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "status", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn cli_rejects_unknown_subcommand() {
    saferwall_cmd()
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn cli_reports_timeout_hint() {
    // Bound but never accepted: the connection opens and the request hangs.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    saferwall_cmd()
        .args(["--api-url", &url, "--timeout", "1", "status", "abc"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("raise --timeout"));

    drop(listener);
}

#[test]
fn cli_rejects_non_numeric_timeout() {
    saferwall_cmd()
        .args(["--timeout", "soon", "file", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));
}

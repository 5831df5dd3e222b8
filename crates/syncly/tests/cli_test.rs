//! Integration tests for the `syncly` CLI binary.
//!
//! Argument parsing, help output, completions and error handling run
//! without a daemon; the rest talk to a wiremock stand-in.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "cli-test-key";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `syncly` binary with env isolation.
///
/// Clears all `SYNCLY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn syncly_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("syncly");
    cmd.env("HOME", "/tmp/syncly-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/syncly-cli-test-nonexistent")
        .env_remove("SYNCLY_PROFILE")
        .env_remove("SYNCLY_URL")
        .env_remove("SYNCLY_API_KEY")
        .env_remove("SYNCLY_OUTPUT")
        .env_remove("SYNCLY_INSECURE")
        .env_remove("SYNCLY_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// `syncly_cmd` aimed at a mock daemon.
fn against(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = syncly_cmd();
    cmd.args(["--url", &format!("{}/rest", server.uri()), "--api-key", API_KEY]);
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
    let output = syncly_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    syncly_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Syncthing")
            .and(predicate::str::contains("folders"))
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("events")),
    );
}

#[test]
fn test_version_flag() {
    syncly_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("syncly"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    syncly_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    syncly_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = syncly_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_missing_api_key_exits_with_auth_code() {
    let output = syncly_cmd().args(["folders", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("API key"), "Expected credential hint:\n{text}");
}

#[test]
fn test_unknown_profile_is_reported() {
    syncly_cmd()
        .args(["--profile", "nope", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_invalid_output_format() {
    let output = syncly_cmd()
        .args(["--output", "invalid", "status"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_unknown_event_type_is_usage_error() {
    let output = syncly_cmd()
        .args(["--api-key", API_KEY, "--url", "http://127.0.0.1:1/rest"])
        .args(["events", "list", "--types", "NotAKind"])
        .output()
        .unwrap();
    // Types are validated before any request is sent
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_connection_refused_exit_code() {
    let output = syncly_cmd()
        .args(["--api-key", API_KEY, "--url", "http://127.0.0.1:1/rest", "ping"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn test_config_show_no_config() {
    syncly_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path() {
    syncly_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_folders_subcommands_exist() {
    syncly_cmd()
        .args(["folders", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("pause"))
                .and(predicate::str::contains("scan"))
                .and(predicate::str::contains("errors")),
        );
}

#[test]
fn test_events_subcommands_exist() {
    syncly_cmd()
        .args(["events", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("watch").and(predicate::str::contains("list")));
}

// ── Against a mock daemon ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_ping_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/system/ping"))
        .and(header("X-API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ping": "pong"})))
        .expect(1)
        .mount(&server)
        .await;

    against(&server)
        .args(["--output", "plain", "ping"])
        .assert()
        .success()
        .stdout("pong\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_key_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/system/status"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let output = against(&server).arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_folders_list_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/config/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "abcd-1234", "label": "Photos", "path": "/data/photos", "type": "sendreceive"},
            {"id": "efgh-5678", "label": "", "path": "/data/docs", "type": "sendonly", "paused": true}
        ])))
        .mount(&server)
        .await;

    against(&server)
        .args(["-o", "plain", "folders", "list"])
        .assert()
        .success()
        .stdout("abcd-1234\nefgh-5678\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_folder_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/config/folders/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let output = against(&server).args(["folders", "get", "nope"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("folders list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_folder_pause_patches_config() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/config/folders/abcd-1234"))
        .and(body_json(json!({"paused": true})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    against(&server)
        .args(["folders", "pause", "abcd-1234"])
        .assert()
        .success()
        .stderr(predicate::str::contains("paused"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scan_with_subdirectory() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/db/scan"))
        .and(query_param("folder", "abcd-1234"))
        .and(query_param("sub", "raw/2024"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    against(&server)
        .args(["folders", "scan", "abcd-1234", "--sub", "raw/2024"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_events_list_json_compact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/events"))
        .and(query_param("since", "5"))
        .and(query_param("events", "StateChanged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 6,
            "globalID": 60,
            "time": "2024-05-01T10:11:12Z",
            "type": "StateChanged",
            "data": {"folder": "abcd-1234", "from": "idle", "to": "scanning", "duration": 0.5}
        }])))
        .mount(&server)
        .await;

    let output = against(&server)
        .args(["-o", "json-compact", "events", "list", "--since", "5", "--types", "StateChanged"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["id"], 6);
    assert_eq!(parsed[0]["data"]["to"], "scanning");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_needs_no_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/noauth/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .mount(&server)
        .await;

    syncly_cmd()
        .args(["--url", &format!("{}/rest", server.uri()), "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

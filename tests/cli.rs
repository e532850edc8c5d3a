use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

fn write_filters(dir: &TempDir, entries: &str) -> PathBuf {
    let path = dir.path().join("filter-string.txt");
    std::fs::write(&path, entries).unwrap();
    path
}

/// The binary with a private config location and an explicit filter list.
fn hook(dir: &TempDir, filter_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("redact-hook").unwrap();
    cmd.env("REDACT_HOOK_CONFIG", dir.path().join("config.toml"))
        .env_remove("RUST_LOG")
        .env_remove("REDACT_HOOK_RG_PATH")
        .env_remove("REDACT_HOOK_SEARCH_TIMEOUT_SECS")
        .arg("--filter-file")
        .arg(filter_file);
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("redact-hook").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("redact-hook").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_usage_error_never_looks_like_deny() {
    let mut cmd = Command::cargo_bin("redact-hook").unwrap();
    let output = cmd
        .args(["pre", "--no-such-flag"])
        .write_stdin("{}")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--no-such-flag"));

    let mut cmd = Command::cargo_bin("redact-hook").unwrap();
    cmd.assert().code(1);
}

#[test]
fn test_malformed_payload_is_a_no_op() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "SECRET\n");

    hook(&dir, &filters)
        .arg("pre")
        .write_stdin("this is not json")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    hook(&dir, &filters)
        .arg("post")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_read_of_dirty_file_is_denied_with_scrubbed_copy() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");
    let target = dir.path().join("creds.txt");
    std::fs::write(&target, "user: admin\npass: hunter2\n").unwrap();

    let payload = json!({
        "tool_name": "Read",
        "tool_input": {"file_path": target},
    });
    let output = hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json = stdout_json(&output);
    let specific = &json["hookSpecificOutput"];
    assert_eq!(specific["hookEventName"], "PreToolUse");
    assert_eq!(specific["permissionDecision"], "deny");
    let reason = specific["permissionDecisionReason"].as_str().unwrap();
    assert!(reason.contains("pass: [FILTERED]"));
    assert!(!reason.contains("hunter2"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[FILTERED]"));
}

#[test]
fn test_read_of_clean_file_proceeds() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");
    let target = dir.path().join("readme.txt");
    std::fs::write(&target, "nothing to see").unwrap();

    let payload = json!({"tool_name": "Read", "tool_input": {"file_path": target}});
    hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_filter_file_itself_cannot_be_read() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "");

    let payload = json!({
        "tool_name": "Read",
        "tool_input": {"file_path": "filter-string.txt"},
        "cwd": dir.path(),
    });
    let output = hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json = stdout_json(&output);
    assert_eq!(
        json["hookSpecificOutput"]["permissionDecisionReason"],
        "cannot read filter configuration file"
    );
}

#[test]
fn test_bash_is_rewritten_through_scrub_stage() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");

    let payload = json!({
        "tool_name": "Bash",
        "tool_input": {"command": "cat creds.txt", "timeout": 5000},
    });
    let output = hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    let specific = &json["hookSpecificOutput"];
    assert_eq!(specific["permissionDecision"], "allow");
    assert_eq!(specific["updatedInput"]["timeout"], 5000);
    let command = specific["updatedInput"]["command"].as_str().unwrap();
    assert!(command.starts_with("(\ncat creds.txt\n) 2>&1 | "));
    assert!(command.contains("scrub --filter-file"));
    assert!(!command.contains("hunter2"));
}

#[cfg(unix)]
#[test]
fn test_rewritten_command_scrubs_when_run() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");

    let payload = json!({
        "tool_name": "Bash",
        "tool_input": {"command": "echo pass=hunter2; echo oops-hunter2 >&2"},
    });
    let output = hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();
    let json = stdout_json(&output);
    let command = json["hookSpecificOutput"]["updatedInput"]["command"]
        .as_str()
        .unwrap()
        .to_string();

    let ran = std::process::Command::new("sh")
        .arg("-c")
        .arg(&command)
        .output()
        .unwrap();
    let text = String::from_utf8_lossy(&ran.stdout);
    assert!(text.contains("pass=[FILTERED]"));
    assert!(text.contains("oops-[FILTERED]"));
    assert!(!text.contains("hunter2"));
}

#[test]
fn test_empty_filter_list_leaves_bash_alone() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "\n\n");

    let payload = json!({"tool_name": "Bash", "tool_input": {"command": "ls"}});
    hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_post_replaces_pluggable_tool_output() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");

    let payload = json!({
        "hook_event_name": "PostToolUse",
        "tool_name": "mcp__vault__get",
        "tool_input": {},
        "tool_response": {"items": ["hunter2", "ok"], "count": 2},
    });
    let output = hook(&dir, &filters)
        .arg("post")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(
        json["hookSpecificOutput"]["updatedMCPToolOutput"],
        json!({"items": ["[FILTERED]", "ok"], "count": 2})
    );
}

#[test]
fn test_post_annotates_builtin_tool_output() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");

    let payload = json!({
        "tool_name": "Bash",
        "tool_input": {"command": "env"},
        "tool_response": "TOKEN=hunter2",
    });
    let output = hook(&dir, &filters)
        .arg("post")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["hookSpecificOutput"]["hookEventName"], "PostToolUse");
    assert_eq!(
        json["hookSpecificOutput"]["additionalContext"],
        "[SANITIZED OUTPUT]\nTOKEN=[FILTERED]"
    );
}

#[test]
fn test_scrub_filters_stdin() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\nswordfish\n");

    hook(&dir, &filters)
        .args(["--quiet", "scrub"])
        .write_stdin("a hunter2 b swordfish c\n")
        .assert()
        .success()
        .stdout("a [FILTERED] b [FILTERED] c\n");
}

#[test]
fn test_scrub_without_filter_file_passes_through() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    hook(&dir, &missing)
        .arg("scrub")
        .write_stdin("untouched hunter2")
        .assert()
        .success()
        .stdout("untouched hunter2");
}

#[test]
fn test_status_json_reports_count_only() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\nswordfish\n");

    let output = hook(&dir, &filters)
        .args(["status", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("hunter2"));
    assert!(!stdout.contains("swordfish"));
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["filter_entries"], 2);
    assert_eq!(json["filter_file_exists"], true);
}

#[test]
fn test_broken_config_still_lets_hook_run() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");
    std::fs::write(dir.path().join("config.toml"), "[fetch\nmax_chars = ").unwrap();

    let payload = json!({"tool_name": "Bash", "tool_input": {"command": "ls"}});
    let output = hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["hookSpecificOutput"]["permissionDecision"],
        "allow"
    );
}

#[cfg(unix)]
fn write_search_stub(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn test_grep_results_are_substituted() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");
    let stub = write_search_stub(&dir, "fake-rg", "printf 'creds.txt:2:pass: hunter2\\n'");
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[search]\nrg_path = \"{}\"\ntimeout_secs = 5\n", stub.display()),
    )
    .unwrap();

    let payload = json!({
        "tool_name": "Grep",
        "tool_input": {"pattern": "pass", "output_mode": "content"},
        "cwd": dir.path(),
    });
    let output = hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let reason = stdout_json(&output)["hookSpecificOutput"]["permissionDecisionReason"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(reason.starts_with("[SANITIZED - filtered content removed from search results]"));
    assert!(reason.contains("creds.txt:2:pass: [FILTERED]"));
}

#[cfg(unix)]
#[test]
fn test_slow_grep_falls_through_after_timeout() {
    let dir = tempdir().unwrap();
    let filters = write_filters(&dir, "hunter2\n");
    let stub = write_search_stub(&dir, "slow-rg", "exec sleep 10");
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[search]\nrg_path = \"{}\"\ntimeout_secs = 1\n", stub.display()),
    )
    .unwrap();

    let payload = json!({"tool_name": "Grep", "tool_input": {"pattern": "pass"}});
    let started = std::time::Instant::now();
    hook(&dir, &filters)
        .arg("pre")
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(started.elapsed() < std::time::Duration::from_secs(8));
}

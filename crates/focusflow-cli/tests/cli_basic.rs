//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory and verify outputs.

use std::process::Command;

/// Run a CLI command against the dev data directory and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusflow-cli", "--"])
        .args(args)
        .env("FOCUSFLOW_ENV", "dev")
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_task_add_and_list() {
    let (stdout, _, code) = run_cli(&["task", "add", "E2E add test", "--category", "Work"]);
    assert_eq!(code, 0, "task add failed");
    assert!(stdout.contains("TaskAdded"));

    let (stdout, _, code) = run_cli(&["task", "list"]);
    assert_eq!(code, 0, "task list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("list is JSON");
    assert!(parsed.as_array().is_some());
}

#[test]
fn test_task_add_rejects_wildcard_category() {
    let (stdout, _, code) = run_cli(&["task", "add", "Wildcard test", "--category", "All"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task rejected"));
}

#[test]
fn test_task_toggle_unknown_id() {
    let (stdout, _, code) = run_cli(&[
        "task",
        "toggle",
        "00000000-0000-0000-0000-000000000000",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task not found"));
}

#[test]
fn test_goal_set_list_complete() {
    let (stdout, _, code) = run_cli(&["goal", "set", "daily", "E2E daily goal"]);
    assert_eq!(code, 0, "goal set failed");
    assert!(stdout.contains("GoalSet"));

    let (stdout, _, code) = run_cli(&["goal", "list"]);
    assert_eq!(code, 0, "goal list failed");
    assert!(stdout.contains("[Daily] E2E daily goal"));

    let (stdout, _, code) = run_cli(&["goal", "complete", "daily"]);
    assert_eq!(code, 0, "goal complete failed");
    assert!(stdout.contains("GoalCompleted"));

    // The slot is now empty; completing again is a no-op.
    let (stdout, _, code) = run_cli(&["goal", "complete", "daily"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No active Daily goal"));
}

#[test]
fn test_goal_rejects_unknown_period() {
    let (_, _, code) = run_cli(&["goal", "set", "hourly", "nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_prioritize_without_api_key_fails_cleanly() {
    let _ = run_cli(&["task", "add", "Prioritize target", "--category", "Work"]);
    let (_, stderr, code) = run_cli(&["task", "prioritize"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("GEMINI_API_KEY"));
}

#[test]
fn test_config_show_and_path() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("[timer]"));

    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "set", "no.such.key", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_stats() {
    let (stdout, _, code) = run_cli(&["stats", "all"]);
    assert_eq!(code, 0, "stats failed");
    assert!(stdout.contains("total_sessions"));
}

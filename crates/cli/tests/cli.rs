//! End-to-end tests for the termkit binary
//!
//! Output is captured through pipes, so every component runs in its
//! non-interactive mode and must not emit any control sequence.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run termkit with an isolated config directory
fn run(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_termkit"))
        .args(args)
        .env("TERMKIT_CONFIG_DIR", config_dir)
        .env_remove("TERMKIT_CONFIG")
        .env_remove("TERMKIT_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute termkit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_spinner_piped_output_is_plain() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["spinner", "Loading", "--steps", "0", "--step-ms", "0", "--final-text", "Done"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "... Loading\n✓ Done\n");
}

#[test]
fn test_spinner_steps_and_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["spinner", "Sync", "--steps", "2", "--step-ms", "0", "--outcome", "fail"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "... Sync\n... Sync [1/2]\n... Sync [2/2]\n✗ Sync [2/2]\n"
    );
}

#[test]
fn test_progress_piped_output_is_throttled() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["progress", "--total", "20", "--step-ms", "0", "--final-text", "Imported"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.first(), Some(&"[5%] 1/20 - item 1"));
    assert_eq!(lines.iter().filter(|l| l.contains("20/20")).count(), 1);
    assert!(lines.contains(&"[100%] 20/20 - item 20"));
    assert_eq!(lines.last(), Some(&"✓ Imported"));
    assert!(!out.contains('\x1b'));
}

#[test]
fn test_task_piped_output() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["task", "Export", "--states", "queued", "--step-ms", "0", "--no-emoji"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("... Export\n... Export queued ("), "{out}");
    assert!(out.ends_with("✓ Export completed in 0s\n"), "{out}");
}

#[test]
fn test_log_json_line() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["--json", "log", "info", "Connected", "--source", "Database", "--data", r#"{"port":5432}"#],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["level"], "INFO");
    assert_eq!(value["source"], "Database");
    assert_eq!(value["message"], "Connected");
    assert_eq!(value["data"]["port"], 5432);
}

#[test]
fn test_log_respects_level_and_quiet() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["--level", "warn", "log", "info", "hidden"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");

    let output = run(dir.path(), &["--quiet", "log", "error", "hidden"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_log_pretty_from_config_file() {
    let dir = TempDir::new().unwrap();
    let log_file = dir.path().join("termkit.log");
    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "schema_version = 1\n\n[logging]\ntimestamp = \"none\"\nshow_emoji = false\nconsole = false\nfile = {:?}\n",
            log_file.to_string_lossy()
        ),
    )
    .unwrap();

    let output = run(dir.path(), &["log", "warn", "Disk almost full", "--source", "Monitor"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
    let written = std::fs::read_to_string(&log_file).unwrap();
    assert_eq!(written, "[WARN ] [Monitor] Disk almost full\n");
}

#[test]
fn test_usage_errors_exit_with_two() {
    let dir = TempDir::new().unwrap();

    let output = run(dir.path(), &["--level", "loud", "log", "info", "x"]);
    assert_eq!(output.status.code(), Some(2));

    let output = run(dir.path(), &["log", "info", "x", "--data", "{broken"]);
    assert_eq!(output.status.code(), Some(2));

    let output = run(dir.path(), &["warnings", "no-separator"]);
    assert_eq!(output.status.code(), Some(2));

    let bad_config = dir.path().join("bad.toml");
    std::fs::write(&bad_config, "schema_version = [").unwrap();
    let output = run(
        dir.path(),
        &["--config", bad_config.to_str().unwrap(), "log", "info", "x"],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_warnings_json_summary() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &[
            "--json",
            "warnings",
            "size=Size not supported@a.png",
            "size=Size not supported@b.png",
            "quality=Quality low",
        ],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let summary = value.as_array().unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0]["category"], "size");
    assert_eq!(summary[0]["count"], 2);
    assert_eq!(summary[0]["examples"], serde_json::json!(["a.png", "b.png"]));
    assert_eq!(summary[1]["category"], "quality");
}

#[test]
fn test_warnings_summary_lines() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["--no-emoji", "warnings", "size=Too big@a.png", "size=Too big@b.png"],
    );

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(
        err.contains("[warnings] size: 2 occurrences (e.g., Too big) [a.png, b.png]"),
        "{err}"
    );
}

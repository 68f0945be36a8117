//! CLI integration tests.
//!
//! Runs the built `fraudsim` binary against temporary data directories.

use std::path::Path;
use std::process::{Command, Output};

fn fraudsim(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fraudsim"))
        .args(args)
        .arg("--data-dir")
        .arg(data_dir)
        .env("RUST_LOG", "info")
        .env_remove("FRAUDSIM_SEED")
        .env_remove("FRAUDSIM_DATABASE")
        .output()
        .expect("failed to run fraudsim")
}

#[test]
fn test_cli_help_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_fraudsim"))
        .arg("--help")
        .output()
        .expect("failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in ["simulate", "batch", "schedule", "generate", "stats", "--data-dir", "--fraud-probability"] {
        assert!(stdout.contains(expected), "help should mention {expected}: {stdout}");
    }
}

#[test]
fn test_cli_version_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_fraudsim"))
        .arg("--version")
        .output()
        .expect("failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1.0"), "version output: {stdout}");
}

#[test]
fn test_generate_prints_json_lines() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let first = fraudsim(temp_dir.path(), &["generate", "--count", "3", "--seed", "42"]);
    let second = fraudsim(temp_dir.path(), &["generate", "--count", "3", "--seed", "42"]);
    assert!(first.status.success());

    let parse = |output: &Output| -> Vec<serde_json::Value> {
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| serde_json::from_str(line).expect("invalid JSON line"))
            .collect()
    };
    let first = parse(&first);
    let second = parse(&second);

    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a["transaction_id"], b["transaction_id"]);
        assert!(a["amount"].as_str().unwrap().split('.').nth(1).unwrap().len() == 2);
    }

    // Nothing is written in preview mode.
    assert!(!temp_dir.path().join("bank_fraud_db.db").exists());
}

#[test]
fn test_batch_then_stats() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let batch = fraudsim(temp_dir.path(), &["batch", "--batch-size", "7"]);
    assert!(
        batch.status.success(),
        "batch failed: {}",
        String::from_utf8_lossy(&batch.stderr)
    );

    let stats = fraudsim(temp_dir.path(), &["stats"]);
    let stdout = String::from_utf8_lossy(&stats.stdout);
    assert!(stdout.contains("transactions: 7"), "stats output: {stdout}");
}

#[test]
fn test_simulate_logs_inserted_rows() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let output = fraudsim(
        temp_dir.path(),
        &["simulate", "--count", "2", "--interval-ms", "0"],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Transaction inserted").count(), 2, "{stdout}");
    assert!(stdout.contains("Simulator stopped"));
}

#[test]
fn test_unusable_data_dir_exits_nonzero() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let file = temp_dir.path().join("not-a-dir");
    std::fs::write(&file, b"x").unwrap();

    let output = fraudsim(&file, &["batch"]);
    assert!(!output.status.success());
}

#[test]
fn test_simulate_logs_connection_failure() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    // The data directory exists but the database file's parent does not.
    let output = fraudsim(
        temp_dir.path(),
        &["simulate", "--count", "3", "--interval-ms", "0", "--database", "missing/bank"],
    );
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Failed to connect to database"), "{stdout}");
    assert!(!stdout.contains("Transaction inserted"), "{stdout}");
    assert!(!temp_dir.path().join("missing").exists());
}

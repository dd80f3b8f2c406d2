//! End-to-end tests of the `aim` binary against the local workspace.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn aim(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aim"))
        .args(args)
        .current_dir(dir)
        .env_remove("AIM_WORKSPACE")
        .env_remove("AIM_ENDPOINT")
        .env_remove("AIM_TOKEN")
        .env_remove("AIM_PRECISION")
        .output()
        .expect("failed to run aim")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_workspaces_lists_both() {
    let dir = tempfile::tempdir().unwrap();
    let output = aim(dir.path(), &["workspaces"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("local"));
    assert!(text.contains("http"));
    assert!(text.contains("AIM_ENDPOINT"));
}

#[test]
fn test_random_qubo_wait() {
    let dir = tempfile::tempdir().unwrap();
    let output = aim(
        dir.path(),
        &["random-qubo", "8", "--fields", "--seed", "1", "--wait"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Job ID:"));
    assert!(text.contains("Objective"));
    assert!(text.contains("Float32"));
}

#[test]
fn test_maxcut_records_submissions() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("graphs")).unwrap();
    fs::write(
        dir.path().join("graphs/square.txt"),
        "4 4\n0 1\n1 2\n2 3\n3 0\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("graphs/triangle.txt"),
        "3 3\n0 1 1.0\n1 2 1.0\n2 0 1.0\n",
    )
    .unwrap();

    let output = aim(
        dir.path(),
        &[
            "maxcut",
            "graphs/*.txt",
            "--wait",
            "-l",
            "jobs.txt",
            "--precision",
            "Float64",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Cut value"));

    let list = fs::read_to_string(dir.path().join("jobs.txt")).unwrap();
    let lines: Vec<&str> = list.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Filename, JobId, Input");
    assert!(lines[1].starts_with("square.txt, "));
    assert!(lines[1].ends_with(", graphs/square.txt"));
    assert!(lines[2].starts_with("triangle.txt, "));
}

#[test]
fn test_maxcut_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "2 1\n0 1 2.5\n").unwrap();
    fs::write(dir.path().join("bad.txt"), "2 1\n0 one\n").unwrap();

    let output = aim(dir.path(), &["maxcut", "bad.txt", "good.txt"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("bad.txt"));

    let list = fs::read_to_string(dir.path().join("submissions.txt")).unwrap();
    assert_eq!(list.lines().count(), 2);
    assert!(list.contains("good.txt"));
}

#[test]
fn test_maxcut_halt_on_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "2 1\n0 1\n").unwrap();

    let output = aim(
        dir.path(),
        &["maxcut", "missing.txt", "good.txt", "--halt-on-error"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing.txt"));
    assert!(!dir.path().join("submissions.txt").exists());
}

#[test]
fn test_zero_timeout_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = aim(dir.path(), &["random-qubo", "4", "--timeout", "0"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Hint:"));
}

#[test]
fn test_status_of_unknown_job() {
    let dir = tempfile::tempdir().unwrap();
    let output = aim(dir.path(), &["status", "no-such-job"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown job: no-such-job"));
}

#[test]
fn test_http_requires_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let output = aim(dir.path(), &["--workspace", "http", "status", "job-1"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("AIM_ENDPOINT"));
}

#[test]
fn test_invalid_precision() {
    let dir = tempfile::tempdir().unwrap();
    let output = aim(dir.path(), &["random-qubo", "4", "--precision", "Float8"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("precision"));
}

#[test]
fn test_random_qubo_oversized_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = aim(dir.path(), &["random-qubo", "100000"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Problem size must be between 1 and"));
}

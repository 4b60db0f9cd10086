//! End-to-end tests for the critpath binary

use assert_cmd::Command;
use predicates::str::{contains, is_empty};
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "task,duration,dependencies\na,2,\nb,3,a\nc,2,a\nd,5,b;c\n";

fn critpath(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("critpath").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_default_file_names() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tasks.csv"), SAMPLE).unwrap();

    critpath(&dir)
        .assert()
        .success()
        .stderr(contains("Task details written to output.csv"))
        .stderr(contains("Timeline written to timeline.csv"));

    let output = fs::read_to_string(dir.path().join("output.csv")).unwrap();
    assert_eq!(
        output,
        "task,duration,ES,EF,LS,LF,slack\n\
         a,2,0,2,0,2,0\n\
         b,3,2,5,2,5,0\n\
         c,2,2,4,3,5,1\n\
         d,5,5,10,5,10,0\n"
    );

    let timeline = fs::read_to_string(dir.path().join("timeline.csv")).unwrap();
    assert_eq!(
        timeline,
        "Task,0,1,2,3,4,5,6,7,8,9\n\
         a,C,C,O,O,O,O,O,O,O,O\n\
         b,O,O,C,C,C,O,O,O,O,O\n\
         c,O,O,X,X,O,O,O,O,O,O\n\
         d,O,O,O,O,O,C,C,C,C,C\n"
    );
}

#[test]
fn test_explicit_paths_and_delimiters() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plan.tsv"), "a\t4\t\nb\t1\ta|a\n").unwrap();

    critpath(&dir)
        .args([
            "plan.tsv",
            "--output",
            "times.tsv",
            "--timeline",
            "grid.tsv",
            "--delimiter",
            "\t",
            "--dependency-separator",
            "|",
            "--no-header",
            "--quiet",
        ])
        .assert()
        .success()
        .stderr(is_empty());

    let output = fs::read_to_string(dir.path().join("times.tsv")).unwrap();
    assert_eq!(
        output,
        "task\tduration\tES\tEF\tLS\tLF\tslack\na\t4\t0\t4\t0\t4\t0\nb\t1\t4\t5\t4\t5\t0\n"
    );
    assert!(dir.path().join("grid.tsv").exists());
}

#[test]
fn test_cycle_fails_without_output() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.csv"),
        "task,duration,dependencies\na,5,b\nb,3,a\n",
    )
    .unwrap();

    critpath(&dir)
        .assert()
        .failure()
        .stderr(contains("Circular dependency detected: a -> b -> a"));

    assert!(!dir.path().join("output.csv").exists());
    assert!(!dir.path().join("timeline.csv").exists());
}

#[test]
fn test_unknown_dependency_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.csv"),
        "task,duration,dependencies\na,5,ghost\n",
    )
    .unwrap();

    critpath(&dir)
        .assert()
        .failure()
        .stderr(contains("Task a depends on unknown task ghost"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();

    critpath(&dir)
        .arg("nope.csv")
        .assert()
        .failure()
        .stderr(contains("Failed to read tasks from nope.csv"));
}

#[test]
fn test_bad_duration_reports_line() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.csv"),
        "task,duration,dependencies\na,2,\nb,three,a\n",
    )
    .unwrap();

    critpath(&dir)
        .assert()
        .failure()
        .stderr(contains("line 3: invalid duration \"three\""));
}

#[test]
fn test_verbose_logs_records() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tasks.csv"), SAMPLE).unwrap();

    critpath(&dir)
        .arg("-vv")
        .assert()
        .success()
        .stderr(contains("Task: d, Duration: 5, Dependencies: b; c"))
        .stderr(contains("critical chain: a -> b -> d"));
}

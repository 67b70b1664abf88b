//! CLI integration tests
//!
//! Drive the `recordx` binary through `run` scripts and check what lands on
//! disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn recordx(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_recordx"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_run_script_persists_json_snapshot() {
    // GIVEN a script adding two people and deleting one
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("script.txt"),
        "add n/Alice Pauline p/94351253\nadd n/Benson Meier\ndelete 1\ny\n",
    )
    .unwrap();

    // WHEN it runs against a fresh data directory
    let output = recordx(temp_dir.path(), &["--data-dir", "store", "run", "script.txt"]);

    // THEN it succeeds and the saved records hold only Benson
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted Person: Alice Pauline"), "{}", stdout);

    let saved: serde_json::Value = serde_json::from_slice(
        &fs::read(temp_dir.path().join("store").join("records.json")).unwrap(),
    )
    .unwrap();
    let names: Vec<&str> = saved["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Benson Meier"]);

    let history: serde_json::Value = serde_json::from_slice(
        &fs::read(temp_dir.path().join("store").join("command_history.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(history["commands"].as_array().unwrap().len(), 4);
}

#[test]
fn test_failing_line_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("script.txt"), "list\nedit 3 p/123\n").unwrap();

    let output = recordx(temp_dir.path(), &["run", "--quiet", "script.txt"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("script failed at line 2: The person index provided is invalid"),
        "{}",
        stderr
    );
}

#[test]
fn test_sqlite_backend_from_config_file() {
    // GIVEN a config selecting the sqlite backend
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("recordx.toml"),
        "[storage]\nbackend = \"sqlite\"\ndata_dir = \"db\"\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("first.txt"), "add n/Carl Kurz\n").unwrap();
    fs::write(temp_dir.path().join("second.txt"), "find carl\n").unwrap();

    // WHEN two runs share the database
    let first = recordx(temp_dir.path(), &["run", "first.txt"]);
    let second = recordx(temp_dir.path(), &["run", "second.txt"]);

    // THEN the second run sees the record saved by the first
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert!(temp_dir.path().join("db").join("recordx.db").exists());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("1 persons listed!"), "{}", stdout);
    assert!(stdout.contains("Carl Kurz"));
}

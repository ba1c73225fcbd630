// tests/cli_tests.rs
// Binary tests for the one-shot subcommands, with HOME pointed at a temp dir

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn terminus(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("terminus").expect("terminus binary must be built");
    cmd.env("HOME", home).env("USER", "tester");
    cmd
}

fn config_dir(home: &TempDir) -> std::path::PathBuf {
    let dir = home.path().join(".config/terminusai");
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_suggest_ping() {
    let home = tempfile::tempdir().unwrap();
    terminus(home.path())
        .args(["suggest", "ping", "example.com"])
        .assert()
        .success()
        .stdout("ping -c 4 example.com\n");
}

#[test]
fn test_suggest_hidden_files() {
    let home = tempfile::tempdir().unwrap();
    terminus(home.path())
        .args(["suggest", "find hidden files in /tmp"])
        .assert()
        .success()
        .stdout("find /tmp -type f -name '.*'\n");
}

#[test]
fn test_suggest_uses_custom_workflow_from_config_flag() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("custom.json");
    fs::write(
        &config,
        r#"{
  "custom_workflows": [
    { "pattern": "open (\\w+) notes", "command": "vim {home}/notes/{1}.md" }
  ]
}"#,
    )
    .unwrap();

    let expected = format!("vim {}/notes/work.md\n", home.path().display());
    terminus(home.path())
        .arg("--config")
        .arg(&config)
        .args(["suggest", "open work notes"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_suggest_uses_yaml_workflows_dir() {
    let home = tempfile::tempdir().unwrap();
    let workflows = config_dir(&home).join("workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(
        workflows.join("git.yaml"),
        "- pattern: \"undo last commit\"\n  command: \"git reset --soft HEAD~1\"\n",
    )
    .unwrap();

    terminus(home.path())
        .args(["suggest", "undo last commit please"])
        .assert()
        .success()
        .stdout("git reset --soft HEAD~1\n");
}

#[test]
fn test_suggest_history_when_empty() {
    let home = tempfile::tempdir().unwrap();
    terminus(home.path())
        .args(["suggest", "history"])
        .assert()
        .success()
        .stdout("No history yet.\n");
}

#[test]
fn test_history_subcommand_reads_saved_file() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        config_dir(&home).join("history.json"),
        r#"[{"query": "disk usage", "command": "df -h"}]"#,
    )
    .unwrap();

    terminus(home.path())
        .arg("history")
        .assert()
        .success()
        .stdout("\nCommand History:\n1. Query: disk usage\n   Command: df -h\n\n");
}

#[test]
fn test_unreachable_backend_exits_nonzero() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        config_dir(&home).join("config.json"),
        r#"{ "ollama_url": "http://127.0.0.1:9" }"#,
    )
    .unwrap();

    let output = terminus(home.path())
        .args(["suggest", "tell", "me", "a", "joke"])
        .assert()
        .failure()
        .get_output()
        .clone();

    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error from LLM:"));
}

#[test]
fn test_piped_repl_simulates_by_default() {
    let home = tempfile::tempdir().unwrap();
    let output = terminus(home.path())
        .arg("--no-color")
        .write_stdin("memory usage\ny\nexit\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let shown = String::from_utf8_lossy(&output.stdout);
    assert!(shown.contains("Suggested command:\ntop -b -n 1"));
    assert!(shown.contains("Safe mode enabled - Simulating execution:"));
    assert!(config_dir(&home).join("history.json").exists());
}

#[test]
fn test_version() {
    let home = tempfile::tempdir().unwrap();
    terminus(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(format!(
            "terminus v{}\nNatural language to shell commands\n",
            env!("CARGO_PKG_VERSION")
        ));
}

#[test]
fn test_malformed_rules_are_skipped_quietly() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        config_dir(&home).join("config.json"),
        r#"{
  "custom_workflows": [
    { "pattern": "([unclosed", "command": "never" },
    { "pattern": "ping" },
    { "command": "orphan" }
  ]
}"#,
    )
    .unwrap();

    terminus(home.path())
        .args(["suggest", "ping example.com"])
        .assert()
        .success()
        .stdout("ping -c 4 example.com\n")
        .stderr("");
}

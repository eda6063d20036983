use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn studydesk(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studydesk").unwrap();
    cmd.env("STUDYDESK_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn settings_set_then_get() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["settings", "set", "breakDuration", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("break_minutes = 5"));

    studydesk(&home)
        .args(["settings", "get", "break_minutes"])
        .assert()
        .success()
        .stdout("5\n");

    assert!(home.path().join("config.yaml").exists());
}

#[test]
fn settings_rejects_zero_minutes() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["settings", "set", "study_minutes", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("study_minutes must be a positive number of minutes"));

    assert!(!home.path().join("config.yaml").exists());
}

#[test]
fn settings_unknown_key() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["settings", "get", "volume"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn status_reflects_settings() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["settings", "set", "study", "25m"])
        .assert()
        .success();

    let output = studydesk(&home)
        .args(["--output", "json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["state"], "idle");
    assert_eq!(status["remaining_study_seconds"], 1500);
}

#[test]
fn todo_add_done_and_list() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["todo", "add", "Revise chapter 2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added #1"));
    studydesk(&home).args(["todo", "add", "Flashcards"]).assert().success();
    studydesk(&home).args(["todo", "done", "1"]).assert().success();

    let output = studydesk(&home)
        .args(["-o", "json", "todo", "list"])
        .output()
        .unwrap();
    let open: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(open["count"], 1);
    assert_eq!(open["items"][0]["title"], "Flashcards");

    studydesk(&home)
        .args(["todo", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revise chapter 2"));
}

#[test]
fn todo_archive_then_list_archived() {
    let home = TempDir::new().unwrap();

    studydesk(&home).args(["todo", "add", "Essay draft"]).assert().success();
    studydesk(&home).args(["todo", "add", "Lab report"]).assert().success();
    studydesk(&home).args(["todo", "done", "1"]).assert().success();
    studydesk(&home)
        .args(["todo", "archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived 1 finished todo"));

    studydesk(&home)
        .args(["todo", "list", "--archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived todos (1 items)"))
        .stdout(predicate::str::contains("Essay draft"))
        .stdout(predicate::str::contains("Lab report").not());
}

#[test]
fn todo_missing_id_fails() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["todo", "done", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("todo #99"));
}

#[test]
fn history_summary_starts_empty() {
    let home = TempDir::new().unwrap();

    let output = studydesk(&home)
        .args(["-o", "json", "history", "summary", "--period", "week"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["study_blocks"], 0);
    assert_eq!(summary["period"], "Last 7 Days");
}

#[test]
fn run_rejects_zero_duration() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["run", "--duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn completions_generate() {
    let home = TempDir::new().unwrap();

    studydesk(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studydesk"));
}

#[test]
fn settings_reset_repairs_invalid_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "cycle:\n  break_minutes: 0\n").unwrap();

    studydesk(&home)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("break_minutes must be positive"));

    studydesk(&home)
        .args(["settings", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));

    studydesk(&home)
        .args(["settings", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings restored to defaults"));

    studydesk(&home)
        .args(["settings", "get", "break_minutes"])
        .assert()
        .success()
        .stdout("10\n");
}

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taskdeck").expect("binary");
    cmd.arg("--data-file").arg(dir.path().join("tasks.json"));
    cmd
}

#[test]
fn help_works() {
    Command::cargo_bin("taskdeck")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("terminal task manager"));
}

#[test]
fn add_then_list_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");

    cmd(&dir)
        .args(["add", "Write the report", "--priority", "high"])
        .assert()
        .success()
        .stdout(contains("Created task"));

    cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Write the report"))
        .stdout(contains("High"))
        .stdout(contains("1 tasks"));
}

#[test]
fn list_search_filters_tasks() {
    let dir = tempfile::tempdir().expect("tempdir");

    cmd(&dir).args(["add", "Write report"]).assert().success();
    cmd(&dir).args(["add", "Ship release"]).assert().success();

    cmd(&dir)
        .args(["list", "--search", "REPORT"])
        .assert()
        .success()
        .stdout(contains("Write report"))
        .stdout(contains("Ship release").not());
}

#[test]
fn json_envelope_parses() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = cmd(&dir)
        .args(["--json", "add", "Structured task"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json envelope");
    assert_eq!(envelope["schema_version"], "taskdeck.v1");
    assert_eq!(envelope["command"], "add");
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"]["title"], "Structured task");
    assert_eq!(envelope["data"]["completed"], false);
}

#[test]
fn empty_title_is_a_user_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    cmd(&dir)
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Title is required"));
}

#[test]
fn unknown_id_is_a_user_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    cmd(&dir)
        .args(["done", "deadbeef"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"));
}

#[test]
fn done_toggles_by_id_prefix() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = cmd(&dir)
        .args(["--json", "add", "Toggle me"])
        .output()
        .expect("run");
    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json envelope");
    let id = envelope["data"]["id"].as_str().expect("id");
    let prefix = &id[..8];

    cmd(&dir)
        .args(["done", prefix])
        .assert()
        .success()
        .stdout(contains("completed"));

    cmd(&dir)
        .args(["done", prefix])
        .assert()
        .success()
        .stdout(contains("reopened"));
}

#[test]
fn delete_removes_the_task() {
    let dir = tempfile::tempdir().expect("tempdir");

    cmd(&dir).args(["add", "Short lived"]).assert().success();

    let output = cmd(&dir)
        .args(["--json", "list"])
        .output()
        .expect("run");
    let envelope: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("json envelope");
    let id = envelope["data"][0]["id"].as_str().expect("id").to_string();

    cmd(&dir)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(contains("Deleted"));

    cmd(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No tasks found"));
}

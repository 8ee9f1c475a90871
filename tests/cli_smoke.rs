mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{todo_cmd, TestList};

#[test]
fn todo_help_works() {
    todo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("To-Do List Manager"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["add", "list", "edit", "delete", "done"] {
        todo_cmd().arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn add_then_list() {
    let list = TestList::new();

    list.cmd()
        .args(["add", "Buy milk", "2999-01-01"])
        .assert()
        .success()
        .stdout(contains("Task 1 added successfully!"))
        .stderr(contains("Tasks file not found"));

    list.cmd()
        .args(["add", "Walk dog", "2998-05-05"])
        .assert()
        .success()
        .stdout(contains("Task 2 added successfully!"));

    assert_eq!(
        list.read_tasks(),
        "1,Buy milk,2999-01-01,Pending\n2,Walk dog,2998-05-05,Pending\n"
    );

    list.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains(
            "[Pending]\n2. Walk dog - Deadline: 2998-05-05\n1. Buy milk - Deadline: 2999-01-01\n",
        ))
        .stdout(contains("No completed tasks."));
}

#[test]
fn past_deadline_is_user_error() {
    let list = TestList::new();

    list.cmd()
        .args(["add", "Old", "2000-01-01"])
        .assert()
        .code(2)
        .stderr(contains("Date cannot be in the past"));

    assert!(!list.tasks_file().exists());
}

#[test]
fn comma_in_description_is_rejected() {
    let list = TestList::new();

    list.cmd()
        .args(["add", "milk, eggs", "2999-01-01"])
        .assert()
        .code(2)
        .stderr(contains("Invalid description"));
}

#[test]
fn delete_unknown_id_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let list = TestList::new();
    list.write_tasks("1,Only,2999-01-01,Pending\n")?;

    list.cmd()
        .args(["delete", "999"])
        .assert()
        .code(2)
        .stderr(contains("Task not found: 999"))
        .stderr(contains("hint: todo list"));

    assert_eq!(list.read_tasks(), "1,Only,2999-01-01,Pending\n");
    Ok(())
}

#[test]
fn edit_done_delete_round() -> Result<(), Box<dyn std::error::Error>> {
    let list = TestList::new();
    list.write_tasks("1,Draft,2999-01-01,Pending\n3,Other,2999-02-02,Pending\n")?;

    list.cmd()
        .args(["edit", "1", "Final", "2999-03-03"])
        .assert()
        .success()
        .stdout(contains("Task 1 updated successfully"));
    list.cmd().args(["done", "3"]).assert().success();
    list.cmd().args(["delete", "1"]).assert().success();

    assert_eq!(list.read_tasks(), "3,Other,2999-02-02,Completed\n");

    list.cmd()
        .args(["done", "1"])
        .assert()
        .code(2)
        .stderr(contains("Task not found: 1"));
    Ok(())
}

#[test]
fn list_json_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let list = TestList::new();
    list.write_tasks("1,Open,2999-01-01,Pending\n2,Closed,2998-01-01,Completed\n")?;

    let output = list.cmd().args(["list", "--json"]).output()?;
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["schema_version"], "todo.v1");
    assert_eq!(payload["command"], "list");
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["data"]["pending"][0]["id"], 1);
    assert_eq!(payload["data"]["pending"][0]["deadline"], "2999-01-01");
    assert_eq!(payload["data"]["completed"][0]["status"], "Completed");
    Ok(())
}

#[test]
fn json_errors_carry_code() -> Result<(), Box<dyn std::error::Error>> {
    let list = TestList::new();

    let output = list.cmd().args(["--json", "done", "4"]).output()?;
    assert_eq!(output.status.code(), Some(2));

    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error"]["kind"], "not_found");
    assert_eq!(payload["error"]["code"], 2);
    Ok(())
}

#[test]
fn corrupt_tasks_file_fails_with_operation_error() -> Result<(), Box<dyn std::error::Error>> {
    let list = TestList::new();
    list.write_tasks("1,fine,2999-01-01,Pending\nbroken line\n")?;

    list.cmd()
        .arg("list")
        .assert()
        .code(4)
        .stderr(contains("Malformed task on line 2"));
    Ok(())
}

#[test]
fn interactive_menu_adds_and_exits() {
    let list = TestList::new();

    list.cmd()
        .write_stdin("1\nBuy milk\n2999-01-01\n2\n6\n")
        .assert()
        .success()
        .stdout(contains("Welcome to To-Do List Manager!"))
        .stdout(contains("Task added successfully!"))
        .stdout(contains("1. Buy milk - Deadline: 2999-01-01"))
        .stdout(contains("Goodbye!"));

    assert_eq!(list.read_tasks(), "1,Buy milk,2999-01-01,Pending\n");
}

#[test]
fn interactive_menu_survives_bad_input() {
    let list = TestList::new();

    list.cmd()
        .write_stdin("7\n5\nnope\n3\n12\n1\nX\n2000-01-01\n6\n")
        .assert()
        .success()
        .stdout(contains("Invalid choice. Please try again."))
        .stdout(contains("Invalid input: 'nope' is not a task id"))
        .stdout(contains("Task not found: 12"))
        .stdout(contains("Date cannot be in the past"));

    assert!(!list.tasks_file().exists());
}

#[test]
fn config_file_selects_tasks_file() -> Result<(), Box<dyn std::error::Error>> {
    let list = TestList::new();
    let config = list.write_config("tasks_file = \"mine.txt\"\n\n[display]\ncolor = false\n")?;

    todo_cmd()
        .arg("--config")
        .arg(&config)
        .args(["add", "From config", "2999-01-01"])
        .assert()
        .success();

    let written = std::fs::read_to_string(list.path().join("mine.txt"))?;
    assert_eq!(written, "1,From config,2999-01-01,Pending\n");
    Ok(())
}

#[test]
fn bad_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let list = TestList::new();
    let config = list.write_config("tasks_file = [\n")?;

    todo_cmd()
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .code(2)
        .stderr(contains("TOML parse error"));
    Ok(())
}

mod support;

use predicates::prelude::*;

use support::TestHome;

#[test]
fn help_lists_subcommands() {
    let home = TestHome::new();
    home.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn commands_require_a_login() {
    let home = TestHome::new();
    home.cmd()
        .arg("whoami")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Not logged in"))
        .stderr(predicate::str::contains("taskly login"));
}

#[test]
fn login_then_whoami_round_trips() {
    let home = TestHome::new();
    home.login("Alice");

    home.cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"));

    let value = home.json(&["whoami"]);
    assert_eq!(value["schema_version"], "taskly.v1");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["id"], "test-user");
}

#[test]
fn logout_forgets_the_user() {
    let home = TestHome::new();
    home.login("Alice");
    home.cmd().arg("logout").assert().success();
    home.cmd().arg("whoami").assert().failure().code(2);
}

#[test]
fn path_like_user_flag_is_rejected() {
    let home = TestHome::new();
    home.cmd()
        .args(["task", "list", "--user", "../../escape"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("user id"));
}

#[test]
fn first_run_is_seeded_with_starter_data() {
    let home = TestHome::new();
    home.login("Alice");

    let value = home.json(&["task", "list"]);
    let tasks = value["data"].as_array().expect("task array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Welcome to Taskly!");

    let value = home.json(&["project", "list"]);
    let projects = value["data"].as_array().expect("project array");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "Personal");
    assert_eq!(projects[1]["name"], "Work");
}

#[test]
fn cleared_data_stays_empty_on_next_run() {
    let home = TestHome::fresh("Alice");

    let value = home.json(&["task", "list"]);
    assert!(value["data"].as_array().unwrap().is_empty());

    // A second invocation must not re-seed.
    let value = home.json(&["task", "list"]);
    assert!(value["data"].as_array().unwrap().is_empty());
}

#[test]
fn config_persists_and_localizes_views() {
    let home = TestHome::fresh("Alice");

    let value = home.json(&["config"]);
    assert_eq!(value["data"]["language"], "en");

    let value = home.json(&["config", "--language", "tr", "--time-format", "24"]);
    assert_eq!(value["data"]["language"], "tr");
    assert_eq!(value["data"]["time_format"], "24");

    // The configured locale drives rendering without a --locale flag.
    let value = home.json(&["show", "today"]);
    assert_eq!(value["data"]["title"], "Bugün");
}

#[test]
fn config_rejects_unknown_locale() {
    let home = TestHome::fresh("Alice");
    home.cmd()
        .args(["config", "--language", "xx"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn json_errors_carry_kind_and_code() {
    let home = TestHome::fresh("Alice");
    let output = home
        .cmd()
        .args(["task", "done", "999", "--json"])
        .assert()
        .failure()
        .code(2)
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["kind"], "user_error");
    assert_eq!(value["error"]["code"], 2);
}

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub struct TestHome {
    dir: TempDir,
}

#[allow(dead_code)]
impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    /// A home with a logged-in user and an empty (cleared) document.
    pub fn fresh(name: &str) -> Self {
        let home = Self::new();
        home.login(name);
        home.clear();
        home
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskly").expect("taskly binary");
        cmd.env("TASKLY_DATA_DIR", self.data_dir());
        cmd.env_remove("TASKLY_USER");
        cmd.current_dir(self.dir.path());
        cmd
    }

    pub fn login(&self, name: &str) {
        self.cmd()
            .args(["login", "--name", name, "--id", "test-user"])
            .assert()
            .success();
    }

    pub fn clear(&self) {
        self.cmd().args(["clear", "--yes"]).assert().success();
    }

    /// Run a command with --json and return the parsed envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json envelope")
    }

    /// Create a task and return its id.
    pub fn add_task(&self, title: &str) -> u64 {
        let value = self.json(&["task", "add", title]);
        value["data"]["id"].as_u64().expect("task id")
    }

    /// Create a project and return its id.
    pub fn add_project(&self, name: &str) -> u64 {
        let value = self.json(&["project", "new", name]);
        value["data"]["id"].as_u64().expect("project id")
    }
}

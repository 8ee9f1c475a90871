#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chrono::NaiveDate;
use tempfile::TempDir;
use todo::repository::TaskRepository;
use todo::storage::TaskStore;

/// A scratch directory holding one tasks file.
pub struct TestList {
    dir: TempDir,
}

impl TestList {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.dir.path().join("tasks.txt")
    }

    pub fn write_tasks(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.tasks_file();
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_tasks(&self) -> String {
        fs::read_to_string(self.tasks_file()).unwrap_or_default()
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join("todo.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Repository over this list with "today" pinned to 2025-06-01.
    pub fn repo(&self) -> TaskRepository {
        TaskRepository::new(TaskStore::new(self.tasks_file()))
            .with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    /// The binary, pointed at this list with color off.
    pub fn cmd(&self) -> Command {
        let mut cmd = todo_cmd();
        cmd.current_dir(self.path())
            .env("TODO_FILE", self.tasks_file())
            .arg("--no-color");
        cmd
    }
}

pub fn todo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("todo").expect("binary");
    cmd.env_remove("TODO_FILE")
        .env_remove("TODO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

//! Storage layer for todo
//!
//! The whole task list lives in a single flat file, one task per line:
//!
//! ```text
//! tasks.txt
//!   1,Buy milk,2030-01-01,Pending
//!   2,File taxes,2030-04-15,Completed
//! ```
//!
//! Every save replaces the file wholesale (write temp + rename). There is no
//! locking; the file is owned by a single running process.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::task::Task;

/// Default tasks file name
pub const TASKS_FILE: &str = "tasks.txt";

/// Result of reading the tasks file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    /// The tasks file did not exist; `tasks` is empty
    pub missing: bool,
}

/// File-backed task storage
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the tasks file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every task from the tasks file.
    ///
    /// A missing file is not an error: it yields an empty list with
    /// `missing` set, and the file is not created. Any malformed line fails
    /// the whole load.
    pub fn load(&self) -> Result<Loaded> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "tasks file not found");
                return Ok(Loaded {
                    tasks: Vec::new(),
                    missing: true,
                });
            }
            Err(err) => return Err(Error::from_read(err, &self.path)),
        };

        let tasks = parse_tasks(&content)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(Loaded {
            tasks,
            missing: false,
        })
    }

    /// Overwrite the tasks file with `tasks`.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let content = render_tasks(tasks);
        write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Parse the full contents of a tasks file.
pub fn parse_tasks(content: &str) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();
    let mut seen = HashSet::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let task = Task::parse_line(trimmed, idx + 1)?;
        if !seen.insert(task.id) {
            return Err(Error::DuplicateId(task.id));
        }
        tasks.push(task);
    }
    Ok(tasks)
}

/// Render tasks as file contents, one newline-terminated line each.
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&task.to_line());
        out.push('\n');
    }
    out
}

/// Atomically replace `path` with `data`.
///
/// Writes to a temporary file in the same directory, syncs it, then renames
/// it over the target, so the file is either fully written or untouched.
/// The parent directory is not created. An existing read-only target is
/// refused, and an existing target's permissions carry over to the new file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    // The rename never consults the target's own mode.
    let existing = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(Error::from_write(err, path)),
    };
    if existing.as_ref().is_some_and(|perms| perms.readonly()) {
        return Err(Error::PermissionDenied(path.to_path_buf()));
    }

    let mut temp = NamedTempFile::new_in(&dir).map_err(|err| Error::from_write(err, path))?;
    temp.write_all(data)
        .map_err(|err| Error::from_write(err, path))?;
    temp.as_file()
        .sync_all()
        .map_err(|err| Error::from_write(err, path))?;
    if let Some(perms) = existing {
        temp.as_file()
            .set_permissions(perms)
            .map_err(|err| Error::from_write(err, path))?;
    }
    temp.persist(path)
        .map_err(|err| Error::from_write(err.error, path))?;

    Ok(())
}

//! Task repository: the CRUD operations over the tasks file.
//!
//! Every operation takes the caller's current collection by reference and
//! returns a freshly reloaded collection. Mutations are applied to a copy,
//! saved, and then the file is read back, so the returned list is exactly
//! what was written. On error the caller's collection is left as it was and
//! nothing is written (validation and not-found errors are raised before
//! any save).

use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};
use crate::storage::{Loaded, TaskStore};
use crate::task::{validate_deadline, validate_description, Task, TaskStatus};
use crate::view::TaskView;

#[derive(Debug, Clone)]
pub struct TaskRepository {
    store: TaskStore,
    today: Option<NaiveDate>,
}

impl TaskRepository {
    pub fn new(store: TaskStore) -> Self {
        Self { store, today: None }
    }

    /// Pin the date deadlines are validated against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The date deadlines must not precede
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Initial load from the tasks file.
    pub fn load(&self) -> Result<Loaded> {
        self.store.load()
    }

    /// Add a new pending task with id `max + 1`.
    pub fn add(&self, tasks: &[Task], description: &str, deadline: &str) -> Result<Vec<Task>> {
        let task = Task::new(next_id(tasks)?, description, deadline, self.today())?;
        tracing::debug!(id = task.id, "adding task");

        let mut updated = tasks.to_vec();
        updated.push(task);
        self.persist(&updated)
    }

    /// Replace the description and deadline of task `id`.
    ///
    /// Both fields are validated before either is applied.
    pub fn edit(
        &self,
        tasks: &[Task],
        id: u32,
        description: &str,
        deadline: &str,
    ) -> Result<Vec<Task>> {
        if find_by_id(tasks, id).is_none() {
            return Err(Error::TaskNotFound(id));
        }
        validate_description(description)?;
        let deadline = validate_deadline(deadline, self.today())?;
        tracing::debug!(id, "editing task");

        let mut updated = tasks.to_vec();
        if let Some(task) = updated.iter_mut().find(|t| t.id == id) {
            task.description = description.to_string();
            task.deadline = deadline;
        }
        self.persist(&updated)
    }

    /// Remove task `id`.
    pub fn delete(&self, tasks: &[Task], id: u32) -> Result<Vec<Task>> {
        let updated: Vec<Task> = tasks.iter().filter(|t| t.id != id).cloned().collect();
        if updated.len() == tasks.len() {
            return Err(Error::TaskNotFound(id));
        }
        tracing::debug!(id, "deleting task");
        self.persist(&updated)
    }

    /// Mark task `id` as completed. Completing a completed task still saves.
    pub fn mark_completed(&self, tasks: &[Task], id: u32) -> Result<Vec<Task>> {
        let mut updated = tasks.to_vec();
        let task = updated
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.status = TaskStatus::Completed;
        tracing::debug!(id, "marking task completed");
        self.persist(&updated)
    }

    /// Pending and completed tasks sorted by deadline. Read-only.
    pub fn list_view(&self, tasks: &[Task]) -> TaskView {
        TaskView::build(tasks)
    }

    fn persist(&self, tasks: &[Task]) -> Result<Vec<Task>> {
        self.store.save(tasks)?;
        Ok(self.store.load()?.tasks)
    }
}

/// Linear scan for task `id`.
pub fn find_by_id(tasks: &[Task], id: u32) -> Option<&Task> {
    tasks.iter().find(|t| t.id == id)
}

/// Next free id: one past the largest id, or 1 for an empty list.
///
/// Ids are never reused, so once `u32::MAX` is taken no more tasks can be added.
pub fn next_id(tasks: &[Task]) -> Result<u32> {
    match tasks.iter().map(|t| t.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(Error::IdsExhausted(max)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> TaskRepository {
        let store = TaskStore::new(temp_dir.path().join("tasks.txt"));
        TaskRepository::new(store).with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(&[]).unwrap(), 1);
    }

    #[test]
    fn next_id_refuses_to_wrap() {
        let task = Task {
            id: u32::MAX,
            description: "last".to_string(),
            deadline: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            status: TaskStatus::Pending,
        };
        assert!(matches!(next_id(&[task]), Err(Error::IdsExhausted(u32::MAX))));
    }

    #[test]
    fn next_id_uses_max_not_last() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let tasks = repo.add(&[], "a", "2025-07-01").unwrap();
        let tasks = repo.add(&tasks, "b", "2025-07-01").unwrap();
        let mut reordered = tasks.clone();
        reordered.reverse();
        assert_eq!(next_id(&reordered).unwrap(), 3);
    }

    #[test]
    fn add_persists_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let tasks = repo.add(&[], "Buy milk", "2025-06-01").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[0].status, TaskStatus::Pending);

        let content = fs::read_to_string(repo.store().path()).unwrap();
        assert_eq!(content, "1,Buy milk,2025-06-01,Pending\n");
    }

    #[test]
    fn add_with_comma_is_rejected_without_write() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let err = repo.add(&[], "milk, eggs", "2025-07-01").unwrap_err();
        assert!(matches!(err, Error::InvalidDescription(_)));
        assert!(!repo.store().path().exists());
    }

    #[test]
    fn edit_checks_existence_before_validation() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let err = repo.edit(&[], 1, "X", "not-a-date").unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(1)));
    }

    #[test]
    fn edit_updates_both_fields() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let tasks = repo.add(&[], "Draft", "2025-07-01").unwrap();

        let tasks = repo.edit(&tasks, 1, "Final", "2025-08-15").unwrap();
        assert_eq!(tasks[0].description, "Final");
        assert_eq!(
            tasks[0].deadline,
            NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
        );
        assert_eq!(tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn edit_keeps_completed_status() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let tasks = repo.add(&[], "Draft", "2025-07-01").unwrap();
        let tasks = repo.mark_completed(&tasks, 1).unwrap();

        let tasks = repo.edit(&tasks, 1, "Final", "2025-07-02").unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Completed);
    }

    #[test]
    fn mark_completed_unknown_id_reports_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let tasks = repo.add(&[], "Draft", "2025-07-01").unwrap();
        let before = fs::read_to_string(repo.store().path()).unwrap();

        let err = repo.mark_completed(&tasks, 42).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(42)));
        assert_eq!(fs::read_to_string(repo.store().path()).unwrap(), before);
    }

    #[test]
    fn failed_save_leaves_caller_collection_intact() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path().join("missing-dir").join("tasks.txt"));
        let repo = TaskRepository::new(store)
            .with_today(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let tasks = vec![Task::new(1, "Keep me", "2025-07-01", repo.today()).unwrap()];

        let err = repo.mark_completed(&tasks, 1).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
        assert_eq!(tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn find_by_id_scans_collection() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let tasks = repo.add(&[], "a", "2025-07-01").unwrap();
        let tasks = repo.add(&tasks, "b", "2025-07-01").unwrap();

        assert_eq!(find_by_id(&tasks, 2).map(|t| t.description.as_str()), Some("b"));
        assert!(find_by_id(&tasks, 3).is_none());
    }
}

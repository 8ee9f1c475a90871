//! Display view of a task list: pending and completed tasks, each sorted by deadline.

use serde::Serialize;

use crate::task::Task;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TaskView {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

impl TaskView {
    /// Partition `tasks` by status and sort each side by ascending deadline.
    ///
    /// The sort is stable, so tasks sharing a deadline keep list order.
    pub fn build(tasks: &[Task]) -> Self {
        let (mut pending, mut completed): (Vec<Task>, Vec<Task>) = tasks
            .iter()
            .cloned()
            .partition(|t| !t.is_completed());
        pending.sort_by_key(|t| t.deadline);
        completed.sort_by_key(|t| t.deadline);
        Self { pending, completed }
    }
}

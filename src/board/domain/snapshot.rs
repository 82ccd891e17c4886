//! Whole-board persistence record.

use super::{Assignment, Task, TaskId, User, UserAlias};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the board persists, in the stored field layout.
///
/// `assignments` is derived from the tasks when a snapshot is taken and is
/// ignored on restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// All tasks in creation order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// All users in creation order.
    #[serde(default)]
    pub users: Vec<User>,
    /// Flattened task assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Identifier the next created task receives.
    #[serde(default)]
    pub next_task_id: TaskId,
}

/// Error returned when a snapshot cannot be turned back into a board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidSnapshotError {
    /// Two users share an alias.
    #[error("duplicate user alias '{0}' in snapshot")]
    DuplicateUser(UserAlias),

    /// Two tasks share an identifier.
    #[error("duplicate task id {0} in snapshot")]
    DuplicateTask(TaskId),
}

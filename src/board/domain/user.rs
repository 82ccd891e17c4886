//! User entity.

use super::{TaskId, UserAlias};
use serde::{Deserialize, Serialize};

/// A person who creates and works on tasks.
///
/// `assigned_task_ids` caches the task edges of this user; the board keeps it
/// in step with task creation, assignment and removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    alias: UserAlias,
    name: String,
    #[serde(default)]
    assigned_task_ids: Vec<TaskId>,
}

impl User {
    /// Creates a user with no tasks.
    #[must_use]
    pub fn new(alias: UserAlias, name: impl Into<String>) -> Self {
        Self {
            alias,
            name: name.into(),
            assigned_task_ids: Vec::new(),
        }
    }

    /// Returns the unique alias.
    #[must_use]
    pub const fn alias(&self) -> &UserAlias {
        &self.alias
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cached task identifiers in insertion order.
    #[must_use]
    pub fn assigned_task_ids(&self) -> &[TaskId] {
        &self.assigned_task_ids
    }

    /// Appends `task_id` unless it is already cached.
    pub fn record_task(&mut self, task_id: TaskId) {
        if !self.assigned_task_ids.contains(&task_id) {
            self.assigned_task_ids.push(task_id);
        }
    }

    /// Drops `task_id` from the cache if present.
    pub fn forget_task(&mut self, task_id: TaskId) {
        self.assigned_task_ids.retain(|id| *id != task_id);
    }
}

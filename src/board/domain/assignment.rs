//! Flat `(task, user, role)` transport record.

use super::{Role, TaskId, UserAlias};
use serde::{Deserialize, Serialize};

/// One user-role edge of a task, flattened for serialization.
///
/// Assignments are derived from [`super::Task::assigned_users`] and are not
/// tracked on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    task_id: TaskId,
    user_alias: UserAlias,
    role: Role,
}

impl Assignment {
    /// Creates an assignment record.
    #[must_use]
    pub const fn new(task_id: TaskId, user_alias: UserAlias, role: Role) -> Self {
        Self {
            task_id,
            user_alias,
            role,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn user_alias(&self) -> &UserAlias {
        &self.user_alias
    }

    /// Returns the held role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

//! Task aggregate root and its lifecycle state machine.

use super::{Assignment, ParseTaskStateError, Role, TaskDomainError, TaskId, UserAlias};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task has been created but work has not started.
    New,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed. Terminal.
    Done,
}

impl TaskState {
    /// Every lifecycle state, in canonical order.
    pub const ALL: [Self; 3] = [Self::New, Self::InProgress, Self::Done];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Returns the states reachable in one step from this state.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::InProgress],
            Self::InProgress => &[Self::New, Self::Done],
            Self::Done => &[],
        }
    }

    /// Returns `true` when `target` is reachable in one step.
    ///
    /// Re-entering the current state is never allowed.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Returns `true` when no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user holding a role on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    user: UserAlias,
    role: Role,
}

impl RoleAssignment {
    /// Pairs a user with a role.
    #[must_use]
    pub const fn new(user: UserAlias, role: Role) -> Self {
        Self { user, role }
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn user(&self) -> &UserAlias {
        &self.user
    }

    /// Returns the held role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Task aggregate root.
///
/// A task always has at least one assigned user, never depends on itself and
/// never lists a dependency twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    creator_alias: UserAlias,
    role: Role,
    state: TaskState,
    dependency_ids: Vec<TaskId>,
    assigned_users: Vec<RoleAssignment>,
}

/// Parameter object for reconstructing a persisted task.
///
/// Optional collections fall back to the values a freshly created task has.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task name.
    pub name: String,
    /// Persisted task description.
    pub description: String,
    /// Alias of the user who created the task.
    pub creator_alias: UserAlias,
    /// Role the creator was assigned under.
    pub role: Role,
    /// Persisted lifecycle state.
    #[serde(default = "default_state")]
    pub state: TaskState,
    /// Persisted dependency identifiers.
    #[serde(default)]
    pub dependency_ids: Vec<TaskId>,
    /// Persisted assignees; `None` restores the creator assignment.
    #[serde(default)]
    pub assigned_users: Option<Vec<RoleAssignment>>,
}

const fn default_state() -> TaskState {
    TaskState::New
}

impl Task {
    /// Creates a task in state [`TaskState::New`] with its creator assigned.
    #[must_use]
    pub fn new(
        id: TaskId,
        name: impl Into<String>,
        description: impl Into<String>,
        creator_alias: UserAlias,
        role: Role,
    ) -> Self {
        let assigned_users = vec![RoleAssignment::new(creator_alias.clone(), role)];
        Self {
            id,
            name: name.into(),
            description: description.into(),
            creator_alias,
            role,
            state: TaskState::New,
            dependency_ids: Vec::new(),
            assigned_users,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPersistedTask`] when the record has
    /// no assignees, assigns a user twice, or lists itself or a duplicate as
    /// a dependency.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        let PersistedTaskData {
            id,
            name,
            description,
            creator_alias,
            role,
            state,
            dependency_ids,
            assigned_users: persisted_assignees,
        } = data;
        let invalid = |reason| TaskDomainError::InvalidPersistedTask {
            task_id: id,
            reason,
        };

        let assigned_users = persisted_assignees
            .unwrap_or_else(|| vec![RoleAssignment::new(creator_alias.clone(), role)]);
        if assigned_users.is_empty() {
            return Err(invalid("no assigned users"));
        }
        if has_duplicates(assigned_users.iter().map(RoleAssignment::user)) {
            return Err(invalid("user assigned more than once"));
        }
        if dependency_ids.contains(&id) {
            return Err(invalid("depends on itself"));
        }
        if has_duplicates(dependency_ids.iter()) {
            return Err(invalid("duplicate dependency"));
        }

        Ok(Self {
            id,
            name,
            description,
            creator_alias,
            role,
            state,
            dependency_ids,
            assigned_users,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the alias of the creating user.
    #[must_use]
    pub const fn creator_alias(&self) -> &UserAlias {
        &self.creator_alias
    }

    /// Returns the role the creator was assigned under.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the declared dependencies in insertion order.
    #[must_use]
    pub fn dependency_ids(&self) -> &[TaskId] {
        &self.dependency_ids
    }

    /// Returns the assigned users in insertion order.
    #[must_use]
    pub fn assigned_users(&self) -> &[RoleAssignment] {
        &self.assigned_users
    }

    /// Returns `true` when `alias` holds a role on this task.
    #[must_use]
    pub fn is_assigned(&self, alias: &UserAlias) -> bool {
        self.assigned_users.iter().any(|entry| entry.user() == alias)
    }

    /// Returns the assignments of this task as transport records.
    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.assigned_users
            .iter()
            .map(|entry| Assignment::new(self.id, entry.user().clone(), entry.role()))
    }

    /// Moves the task to `target`.
    ///
    /// Dependency completion is not checked here; callers completing a task
    /// consult [`Task::can_complete`] first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when `target` is not
    /// reachable from the current state, including re-entering it.
    pub fn change_state(&mut self, target: TaskState) -> Result<(), TaskDomainError> {
        if !self.state.can_transition_to(target) {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id,
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        Ok(())
    }

    /// Declares a dependency on another task.
    ///
    /// Existence of the target and self-dependency are checked by the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateDependency`] when the dependency
    /// is already declared.
    pub fn add_dependency(&mut self, dependency_id: TaskId) -> Result<(), TaskDomainError> {
        if self.dependency_ids.contains(&dependency_id) {
            return Err(TaskDomainError::DuplicateDependency {
                task_id: self.id,
                dependency_id,
            });
        }
        self.dependency_ids.push(dependency_id);
        Ok(())
    }

    /// Drops a declared dependency.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DependencyNotFound`] when the dependency is
    /// not declared.
    pub fn remove_dependency(&mut self, dependency_id: TaskId) -> Result<(), TaskDomainError> {
        let position = self
            .dependency_ids
            .iter()
            .position(|id| *id == dependency_id)
            .ok_or(TaskDomainError::DependencyNotFound {
                task_id: self.id,
                dependency_id,
            })?;
        self.dependency_ids.remove(position);
        Ok(())
    }

    /// Returns `true` when every dependency is present in `tasks` and done.
    ///
    /// A dependency missing from `tasks` counts as unfinished.
    #[must_use]
    pub fn can_complete(&self, tasks: &[Self]) -> bool {
        self.dependency_ids.iter().all(|dependency_id| {
            tasks
                .iter()
                .find(|task| task.id == *dependency_id)
                .is_some_and(|task| task.state == TaskState::Done)
        })
    }

    /// Assigns a user to the task under `role`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateAssignment`] when the user already
    /// holds a role on the task.
    pub fn assign_user(&mut self, alias: UserAlias, role: Role) -> Result<(), TaskDomainError> {
        if self.is_assigned(&alias) {
            return Err(TaskDomainError::DuplicateAssignment {
                task_id: self.id,
                alias,
            });
        }
        self.assigned_users.push(RoleAssignment::new(alias, role));
        Ok(())
    }

    /// Removes a user from the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UserNotAssigned`] when the user holds no
    /// role on the task, or [`TaskDomainError::LastUserViolation`] when the
    /// user is the only assignee.
    pub fn remove_user(&mut self, alias: &UserAlias) -> Result<(), TaskDomainError> {
        let position = self
            .assigned_users
            .iter()
            .position(|entry| entry.user() == alias)
            .ok_or_else(|| TaskDomainError::UserNotAssigned {
                task_id: self.id,
                alias: alias.clone(),
            })?;
        if self.assigned_users.len() <= 1 {
            return Err(TaskDomainError::LastUserViolation(self.id));
        }
        self.assigned_users.remove(position);
        Ok(())
    }
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(data: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(data)
    }
}

fn has_duplicates<T: PartialEq>(items: impl Iterator<Item = T>) -> bool {
    let mut seen: Vec<T> = Vec::new();
    for item in items {
        if seen.contains(&item) {
            return true;
        }
        seen.push(item);
    }
    false
}

//! Error types for task board validation and orchestration.

use super::{TaskId, TaskState, UserAlias};
use thiserror::Error;

/// Errors raised by task and user entities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A vocabulary or scalar value is not accepted for the named field.
    #[error("invalid {field} '{value}'")]
    InvalidValue {
        /// Field that carried the value.
        field: &'static str,
        /// Raw rejected value.
        value: String,
    },

    /// The requested state is not reachable from the current state.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current state.
        from: TaskState,
        /// Requested state.
        to: TaskState,
    },

    /// The dependency is already declared on the task.
    #[error("task {task_id} already depends on task {dependency_id}")]
    DuplicateDependency {
        /// Dependent task.
        task_id: TaskId,
        /// Dependency target.
        dependency_id: TaskId,
    },

    /// The dependency is not declared on the task.
    #[error("task {task_id} does not depend on task {dependency_id}")]
    DependencyNotFound {
        /// Dependent task.
        task_id: TaskId,
        /// Dependency target.
        dependency_id: TaskId,
    },

    /// The user already holds a role on the task.
    #[error("user '{alias}' is already assigned to task {task_id}")]
    DuplicateAssignment {
        /// Task identifier.
        task_id: TaskId,
        /// User alias.
        alias: UserAlias,
    },

    /// The user holds no role on the task.
    #[error("user '{alias}' is not assigned to task {task_id}")]
    UserNotAssigned {
        /// Task identifier.
        task_id: TaskId,
        /// User alias.
        alias: UserAlias,
    },

    /// Removing the user would leave the task without assignees.
    #[error("task {0} must keep at least one assigned user")]
    LastUserViolation(TaskId),

    /// A persisted task record breaks an entity invariant.
    #[error("persisted task {task_id} is invalid: {reason}")]
    InvalidPersistedTask {
        /// Task identifier from the record.
        task_id: TaskId,
        /// Violated invariant.
        reason: &'static str,
    },
}

impl TaskDomainError {
    /// Builds an [`TaskDomainError::InvalidValue`] for `field`.
    #[must_use]
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

/// Errors raised while enforcing rules that span users and tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A user with the alias already exists.
    #[error("user '{0}' already exists")]
    DuplicateUser(UserAlias),

    /// No user is registered under the alias.
    #[error("user '{0}' does not exist")]
    UnknownUser(UserAlias),

    /// No task carries the identifier.
    #[error("task {0} does not exist")]
    UnknownTask(TaskId),

    /// A task may not depend on itself.
    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    /// No identifier is left for a new task.
    #[error("task identifiers are exhausted")]
    TaskIdsExhausted,

    /// At least one dependency is missing or not yet done.
    #[error("task {0} cannot be completed while dependencies are unfinished")]
    DependencyNotSatisfied(TaskId),

    /// An entity rejected the operation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Error returned while parsing a role name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing a task state name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

impl From<ParseRoleError> for TaskDomainError {
    fn from(err: ParseRoleError) -> Self {
        Self::invalid_value("role", err.0)
    }
}

impl From<ParseTaskStateError> for TaskDomainError {
    fn from(err: ParseTaskStateError) -> Self {
        Self::invalid_value("state", err.0)
    }
}

impl From<ParseRoleError> for BoardError {
    fn from(err: ParseRoleError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<ParseTaskStateError> for BoardError {
    fn from(err: ParseTaskStateError) -> Self {
        Self::Domain(err.into())
    }
}

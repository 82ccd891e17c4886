//! Service layer persisting every board mutation.

use crate::board::{
    domain::{
        BoardError, BoardSnapshot, Role, Task, TaskBoard, TaskId, TaskState, User, UserAlias,
        UserWithTasks,
    },
    ports::{SnapshotStore, SnapshotStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    alias: String,
    name: String,
}

impl CreateUserRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            name: name.into(),
        }
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    description: String,
    creator: String,
    role: String,
}

impl CreateTaskRequest {
    /// Creates a request; `role` is parsed when the request is executed.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        creator: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            creator: creator.into(),
            role: role.into(),
        }
    }
}

/// Request payload for moving a task to another state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStateRequest {
    task_id: TaskId,
    target_state: String,
}

impl UpdateTaskStateRequest {
    /// Creates a request; `target_state` is parsed when executed.
    #[must_use]
    pub fn new(task_id: TaskId, target_state: impl Into<String>) -> Self {
        Self {
            task_id,
            target_state: target_state.into(),
        }
    }
}

/// Request payload for assigning a user to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignUserRequest {
    task_id: TaskId,
    alias: String,
    role: String,
}

impl AssignUserRequest {
    /// Creates a request; `role` is parsed when executed.
    #[must_use]
    pub fn new(task_id: TaskId, alias: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            task_id,
            alias: alias.into(),
            role: role.into(),
        }
    }
}

/// Coarse classification used by boundaries to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced user or task does not exist.
    NotFound,
    /// A business rule rejected the operation.
    ConstraintViolation,
    /// Infrastructure failed.
    Unexpected,
}

/// Service-level errors for task board operations.
#[derive(Debug, Error)]
pub enum TaskTrackerError {
    /// The board rejected the operation.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The snapshot store failed.
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
}

impl TaskTrackerError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Board(BoardError::UnknownUser(_) | BoardError::UnknownTask(_)) => {
                ErrorKind::NotFound
            }
            Self::Board(_) => ErrorKind::ConstraintViolation,
            Self::Store(_) => ErrorKind::Unexpected,
        }
    }
}

/// Result type for task tracker operations.
pub type TaskTrackerResult<T> = Result<T, TaskTrackerError>;

/// Task board orchestration service.
///
/// The whole board sits behind one lock, held across persistence, so callers
/// never observe or store an intermediate state. A mutation is applied to a
/// working copy and only replaces the live board once the store accepted the
/// resulting snapshot.
pub struct TaskTrackerService<S>
where
    S: SnapshotStore,
{
    store: Arc<S>,
    board: Mutex<TaskBoard>,
}

impl<S> TaskTrackerService<S>
where
    S: SnapshotStore,
{
    /// Loads the stored board, starting empty when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTrackerError::Store`] when the snapshot cannot be read
    /// or is inconsistent.
    pub async fn open(store: Arc<S>) -> TaskTrackerResult<Self> {
        let board = match store.load().await? {
            Some(snapshot) => {
                TaskBoard::from_snapshot(snapshot).map_err(SnapshotStoreError::from)?
            }
            None => TaskBoard::new(),
        };
        info!(
            users = board.users().len(),
            tasks = board.tasks().len(),
            next_task_id = %board.next_task_id(),
            "task board loaded"
        );
        Ok(Self {
            store,
            board: Mutex::new(board),
        })
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateUser`], an invalid alias error, or a
    /// store failure.
    pub async fn create_user(&self, request: CreateUserRequest) -> TaskTrackerResult<User> {
        let CreateUserRequest { alias, name } = request;
        let user = self
            .mutate("create_user", |board| {
                let user_alias = UserAlias::new(alias)?;
                board.create_user(user_alias, name).cloned()
            })
            .await?;
        info!(alias = %user.alias(), "user created");
        Ok(user)
    }

    /// Creates a task and assigns its creator.
    ///
    /// # Errors
    ///
    /// Returns an invalid role error, [`BoardError::UnknownUser`], or a store
    /// failure.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskTrackerResult<Task> {
        let CreateTaskRequest {
            name,
            description,
            creator,
            role,
        } = request;
        let task = self
            .mutate("create_task", |board| {
                let creator_role = Role::try_from(role.as_str())?;
                let creator_alias = UserAlias::new(creator)?;
                board
                    .create_task(name, description, &creator_alias, creator_role)
                    .cloned()
            })
            .await?;
        info!(task_id = %task.id(), creator = %task.creator_alias(), "task created");
        Ok(task)
    }

    /// Moves a task to a new state.
    ///
    /// # Errors
    ///
    /// Returns an invalid state or transition error,
    /// [`BoardError::UnknownTask`], [`BoardError::DependencyNotSatisfied`], or
    /// a store failure.
    pub async fn update_task_state(
        &self,
        request: UpdateTaskStateRequest,
    ) -> TaskTrackerResult<Task> {
        let UpdateTaskStateRequest {
            task_id,
            target_state,
        } = request;
        let task = self
            .mutate("update_task_state", |board| {
                let target = TaskState::try_from(target_state.as_str())?;
                board.update_task_state(task_id, target).cloned()
            })
            .await?;
        info!(task_id = %task_id, state = %task.state(), "task state updated");
        Ok(task)
    }

    /// Assigns a user to a task.
    ///
    /// # Errors
    ///
    /// Returns an invalid role error, an unknown task or user error, a
    /// duplicate assignment error, or a store failure.
    pub async fn assign_user_to_task(&self, request: AssignUserRequest) -> TaskTrackerResult<Task> {
        let AssignUserRequest {
            task_id,
            alias,
            role,
        } = request;
        let task = self
            .mutate("assign_user_to_task", |board| {
                let assignee_role = Role::try_from(role.as_str())?;
                let assignee = UserAlias::new(alias)?;
                board
                    .assign_user_to_task(task_id, &assignee, assignee_role)
                    .cloned()
            })
            .await?;
        info!(task_id = %task_id, "user assigned to task");
        Ok(task)
    }

    /// Removes a user from a task.
    ///
    /// # Errors
    ///
    /// Returns an unknown task or user error, a not-assigned or last-user
    /// error, or a store failure.
    pub async fn remove_user_from_task(
        &self,
        task_id: TaskId,
        alias: &str,
    ) -> TaskTrackerResult<Task> {
        let task = self
            .mutate("remove_user_from_task", |board| {
                let assignee = UserAlias::new(alias)?;
                board.remove_user_from_task(task_id, &assignee).cloned()
            })
            .await?;
        info!(task_id = %task_id, alias, "user removed from task");
        Ok(task)
    }

    /// Makes a task depend on another task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`], [`BoardError::SelfDependency`], a
    /// duplicate dependency error, or a store failure.
    pub async fn add_task_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskTrackerResult<Task> {
        let task = self
            .mutate("add_task_dependency", |board| {
                board.add_task_dependency(task_id, dependency_id).cloned()
            })
            .await?;
        info!(task_id = %task_id, dependency_id = %dependency_id, "dependency added");
        Ok(task)
    }

    /// Drops a dependency from a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`], a dependency-not-found error, or a
    /// store failure.
    pub async fn remove_task_dependency(
        &self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> TaskTrackerResult<Task> {
        let task = self
            .mutate("remove_task_dependency", |board| {
                board.remove_task_dependency(task_id, dependency_id).cloned()
            })
            .await?;
        info!(task_id = %task_id, dependency_id = %dependency_id, "dependency removed");
        Ok(task)
    }

    /// Returns a user with the full records of its tasks.
    ///
    /// Returns `None` for unknown or blank aliases.
    pub async fn get_user_with_tasks(&self, alias: &str) -> Option<UserWithTasks> {
        let user_alias = UserAlias::new(alias).ok()?;
        self.board.lock().await.user_with_tasks(&user_alias)
    }

    /// Looks up a task by identifier.
    pub async fn find_task(&self, task_id: TaskId) -> Option<Task> {
        self.board.lock().await.find_task(task_id).cloned()
    }

    /// Returns every user in creation order.
    pub async fn list_users(&self) -> Vec<User> {
        self.board.lock().await.users().to_vec()
    }

    /// Returns every task in creation order.
    pub async fn list_tasks(&self) -> Vec<Task> {
        self.board.lock().await.tasks().to_vec()
    }

    /// Returns the current board snapshot.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.board.lock().await.snapshot()
    }

    async fn mutate<T, F>(&self, operation: &'static str, apply: F) -> TaskTrackerResult<T>
    where
        F: FnOnce(&mut TaskBoard) -> Result<T, BoardError>,
    {
        let mut live = self.board.lock().await;
        let mut working = live.clone();
        let outcome = apply(&mut working).inspect_err(|err| {
            warn!(operation, error = %err, "task board operation rejected");
        })?;
        self.store
            .save(&working.snapshot())
            .await
            .inspect_err(|err| {
                error!(operation, error = %err, "failed to persist task board");
            })?;
        *live = working;
        Ok(outcome)
    }
}

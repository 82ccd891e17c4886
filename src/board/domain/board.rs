//! In-memory task board enforcing rules that span users and tasks.

use super::{
    BoardError, BoardSnapshot, InvalidSnapshotError, Role, Task, TaskId, TaskState, User,
    UserAlias,
};
use serde::Serialize;

/// Authoritative collections of users and tasks plus the id counter.
///
/// Every mutation validates all preconditions before touching state, so a
/// failed operation leaves the board unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_task_id: TaskId,
}

/// A user together with the tasks it is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithTasks {
    /// User alias.
    pub alias: UserAlias,
    /// Display name.
    pub name: String,
    /// Cached task identifiers of the user.
    pub assigned_task_ids: Vec<TaskId>,
    /// Full records of the cached tasks that still exist.
    pub tasks: Vec<Task>,
}

impl TaskBoard {
    /// Creates an empty board whose first task receives [`TaskId::FIRST`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from a persisted snapshot.
    ///
    /// The id counter is raised past the highest stored task id so ids are
    /// never handed out twice. A stored id of `u64::MAX` pins the counter
    /// there, and [`TaskBoard::create_task`] then reports exhaustion.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSnapshotError`] when two users share an alias or two
    /// tasks share an id.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self, InvalidSnapshotError> {
        let BoardSnapshot {
            tasks,
            users,
            next_task_id,
            ..
        } = snapshot;

        for (index, user) in users.iter().enumerate() {
            if users.iter().take(index).any(|other| other.alias() == user.alias()) {
                return Err(InvalidSnapshotError::DuplicateUser(user.alias().clone()));
            }
        }
        for (index, task) in tasks.iter().enumerate() {
            if tasks.iter().take(index).any(|other| other.id() == task.id()) {
                return Err(InvalidSnapshotError::DuplicateTask(task.id()));
            }
        }

        let counter_floor = tasks
            .iter()
            .map(|task| task.id().next().unwrap_or(task.id()))
            .max()
            .unwrap_or(TaskId::FIRST);
        Ok(Self {
            users,
            tasks,
            next_task_id: next_task_id.max(counter_floor),
        })
    }

    /// Serializes all collections and the id counter.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.tasks.clone(),
            users: self.users.clone(),
            assignments: self.tasks.iter().flat_map(Task::assignments).collect(),
            next_task_id: self.next_task_id,
        }
    }

    /// Returns all users in creation order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns all tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the identifier the next created task receives.
    #[must_use]
    pub const fn next_task_id(&self) -> TaskId {
        self.next_task_id
    }

    /// Looks up a user by alias.
    #[must_use]
    pub fn find_user(&self, alias: &UserAlias) -> Option<&User> {
        self.users.iter().find(|user| user.alias() == alias)
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn find_task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the user and the full record of each cached task.
    ///
    /// Cached ids whose task no longer exists are skipped.
    #[must_use]
    pub fn user_with_tasks(&self, alias: &UserAlias) -> Option<UserWithTasks> {
        let user = self.find_user(alias)?;
        let tasks = user
            .assigned_task_ids()
            .iter()
            .filter_map(|task_id| self.find_task(*task_id))
            .cloned()
            .collect();
        Some(UserWithTasks {
            alias: user.alias().clone(),
            name: user.name().to_owned(),
            assigned_task_ids: user.assigned_task_ids().to_vec(),
            tasks,
        })
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateUser`] when the alias is taken.
    pub fn create_user(
        &mut self,
        alias: UserAlias,
        name: impl Into<String>,
    ) -> Result<&User, BoardError> {
        if self.find_user(&alias).is_some() {
            return Err(BoardError::DuplicateUser(alias));
        }
        self.users.push(User::new(alias.clone(), name));
        self.user(&alias)
    }

    /// Creates a task owned by `creator` and links it to the creator.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownUser`] when the creator is not registered
    /// and [`BoardError::TaskIdsExhausted`] when no further id can follow
    /// the one this task would receive.
    pub fn create_task(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        creator: &UserAlias,
        role: Role,
    ) -> Result<&Task, BoardError> {
        let task_id = self.next_task_id;
        let following = task_id.next().ok_or(BoardError::TaskIdsExhausted)?;
        let user = self.user_mut(creator)?;
        user.record_task(task_id);
        self.tasks
            .push(Task::new(task_id, name, description, creator.clone(), role));
        self.next_task_id = following;
        self.task(task_id)
    }

    /// Moves a task to `target`.
    ///
    /// Completing a task additionally requires every dependency to exist and
    /// be done.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`], a transition error from the task,
    /// or [`BoardError::DependencyNotSatisfied`].
    pub fn update_task_state(
        &mut self,
        task_id: TaskId,
        target: TaskState,
    ) -> Result<&Task, BoardError> {
        let task = self.task(task_id)?;
        if target == TaskState::Done
            && task.state().can_transition_to(target)
            && !task.can_complete(&self.tasks)
        {
            return Err(BoardError::DependencyNotSatisfied(task_id));
        }
        self.task_mut(task_id)?.change_state(target)?;
        self.task(task_id)
    }

    /// Assigns a registered user to a task and links the task to the user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`], [`BoardError::UnknownUser`] or an
    /// assignment error from the task.
    pub fn assign_user_to_task(
        &mut self,
        task_id: TaskId,
        alias: &UserAlias,
        role: Role,
    ) -> Result<&Task, BoardError> {
        self.task(task_id)?;
        self.user(alias)?;
        self.task_mut(task_id)?.assign_user(alias.clone(), role)?;
        self.user_mut(alias)?.record_task(task_id);
        self.task(task_id)
    }

    /// Removes a user from a task and unlinks the task from the user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`], [`BoardError::UnknownUser`] or a
    /// removal error from the task.
    pub fn remove_user_from_task(
        &mut self,
        task_id: TaskId,
        alias: &UserAlias,
    ) -> Result<&Task, BoardError> {
        self.task(task_id)?;
        self.user(alias)?;
        self.task_mut(task_id)?.remove_user(alias)?;
        self.user_mut(alias)?.forget_task(task_id);
        self.task(task_id)
    }

    /// Makes `task_id` depend on `dependency_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] for either id,
    /// [`BoardError::SelfDependency`], or a duplicate error from the task.
    pub fn add_task_dependency(
        &mut self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> Result<&Task, BoardError> {
        self.task(task_id)?;
        if dependency_id == task_id {
            return Err(BoardError::SelfDependency(task_id));
        }
        self.task(dependency_id)?;
        self.task_mut(task_id)?.add_dependency(dependency_id)?;
        self.task(task_id)
    }

    /// Drops the dependency of `task_id` on `dependency_id`.
    ///
    /// The dependency target does not need to exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] or a not-found error from the task.
    pub fn remove_task_dependency(
        &mut self,
        task_id: TaskId,
        dependency_id: TaskId,
    ) -> Result<&Task, BoardError> {
        self.task_mut(task_id)?.remove_dependency(dependency_id)?;
        self.task(task_id)
    }

    fn user(&self, alias: &UserAlias) -> Result<&User, BoardError> {
        self.find_user(alias)
            .ok_or_else(|| BoardError::UnknownUser(alias.clone()))
    }

    fn user_mut(&mut self, alias: &UserAlias) -> Result<&mut User, BoardError> {
        self.users
            .iter_mut()
            .find(|user| user.alias() == alias)
            .ok_or_else(|| BoardError::UnknownUser(alias.clone()))
    }

    fn task(&self, task_id: TaskId) -> Result<&Task, BoardError> {
        self.find_task(task_id)
            .ok_or(BoardError::UnknownTask(task_id))
    }

    fn task_mut(&mut self, task_id: TaskId) -> Result<&mut Task, BoardError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or(BoardError::UnknownTask(task_id))
    }
}

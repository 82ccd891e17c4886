//! HTTP request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::domain::{Task, TaskId, User};

// ============================================================================
// Request bodies
// ============================================================================

/// Body of `POST /users`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserBody {
    /// Alias of the new user.
    pub contact: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskBody {
    /// Task name.
    pub name: Option<String>,
    /// Task description.
    pub description: Option<String>,
    /// Alias of the creating user.
    pub user: Option<String>,
    /// Role of the creator.
    pub role: Option<String>,
}

/// Body of `POST /tasks/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskStateBody {
    /// Target state.
    pub state: Option<String>,
}

/// Body of `POST /tasks/{id}/users`.
#[derive(Debug, Default, Deserialize)]
pub struct ManageTaskUsersBody {
    /// Alias of the user to add or remove.
    pub user: Option<String>,
    /// Role, required when adding.
    pub role: Option<String>,
    /// `add` or `remove`.
    pub action: Option<String>,
}

/// Body of `POST /tasks/{id}/dependencies`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageTaskDependenciesBody {
    /// Dependency target, as a JSON integer or numeric string.
    #[serde(default)]
    pub dependency_task_id: Value,
    /// `add` or `remove`.
    pub action: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

/// Response of `POST /users`.
#[derive(Debug, Serialize)]
pub struct UserCreatedResponse {
    /// Outcome message.
    pub message: String,
    /// The created user.
    pub user: User,
}

/// Response of `POST /tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreatedResponse {
    /// Outcome message.
    pub message: String,
    /// Identifier of the created task.
    pub task_id: TaskId,
}

/// Response of task mutations.
#[derive(Debug, Serialize)]
pub struct TaskUpdatedResponse {
    /// Outcome message.
    pub message: String,
    /// The task after the mutation.
    pub task: Task,
}

/// Response of `GET /users`.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    /// All users in creation order.
    pub users: Vec<User>,
}

/// Response of `GET /tasks`.
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// All tasks in creation order.
    pub tasks: Vec<Task>,
}

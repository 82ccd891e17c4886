//! HTTP request handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::debug;

use super::{
    ApiError, SharedTracker,
    responses::{
        CreateTaskBody, CreateUserBody, ManageTaskDependenciesBody, ManageTaskUsersBody,
        TaskCreatedResponse, TaskListResponse, TaskUpdatedResponse, UpdateTaskStateBody,
        UserCreatedResponse, UserListResponse,
    },
};
use crate::board::{
    domain::{BoardError, Task, TaskId, UserWithTasks},
    ports::SnapshotStore,
    services::{AssignUserRequest, CreateTaskRequest, CreateUserRequest, UpdateTaskStateRequest},
};

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type TaskPath = Result<Path<u64>, PathRejection>;

/// Membership or dependency edit requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditAction {
    Add,
    Remove,
}

impl EditAction {
    fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(ApiError::Unprocessable(format!(
                "action must be 'add' or 'remove', got '{other}'"
            ))),
        }
    }
}

fn task_id(path: TaskPath) -> Result<TaskId, ApiError> {
    let Path(raw) = path?;
    Ok(TaskId::new(raw))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    let present = value.ok_or_else(|| ApiError::Validation(format!("field '{field}' is required")))?;
    if present.trim().is_empty() {
        return Err(ApiError::Validation(format!(
            "field '{field}' must not be empty"
        )));
    }
    Ok(present)
}

fn dependency_id(value: &Value) -> Result<TaskId, ApiError> {
    let parsed = match value {
        Value::Null => {
            return Err(ApiError::Validation(
                "field 'dependencyTaskId' is required".to_owned(),
            ));
        }
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.map(TaskId::new).ok_or_else(|| {
        ApiError::Unprocessable(format!("dependencyTaskId must be an integer, got {value}"))
    })
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("resource not found".to_owned())
}

/// `GET /users`: lists every user.
pub async fn list_users<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
) -> Json<UserListResponse> {
    Json(UserListResponse {
        users: tracker.list_users().await,
    })
}

/// `GET /users/alias={alias}`: returns a user with its tasks.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for selectors other than `alias=…` and for
/// unknown aliases.
pub async fn get_user_with_tasks<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
    Path(selector): Path<String>,
) -> Result<Json<UserWithTasks>, ApiError> {
    let alias = selector
        .strip_prefix("alias=")
        .ok_or_else(|| ApiError::NotFound("resource not found".to_owned()))?;
    tracker
        .get_user_with_tasks(alias)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("user '{alias}' not found")))
}

/// `POST /users`: registers a user.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for missing fields and
/// [`ApiError::Tracker`] when the board rejects the user.
pub async fn create_user<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
    body: JsonBody<CreateUserBody>,
) -> Result<(StatusCode, Json<UserCreatedResponse>), ApiError> {
    let Json(body) = body?;
    let contact = required(body.contact, "contact")?;
    let name = required(body.name, "name")?;

    let user = tracker
        .create_user(CreateUserRequest::new(contact, name))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "user created".to_owned(),
            user,
        }),
    ))
}

/// `GET /tasks`: lists every task.
pub async fn list_tasks<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
) -> Json<TaskListResponse> {
    Json(TaskListResponse {
        tasks: tracker.list_tasks().await,
    })
}

/// `GET /tasks/{id}`: returns one task.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for unknown or non-integer ids.
pub async fn get_task<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
    path: TaskPath,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    tracker
        .find_task(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))
}

/// `POST /tasks`: creates a task.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for missing fields and
/// [`ApiError::Tracker`] for bad roles or unknown creators.
pub async fn create_task<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
    body: JsonBody<CreateTaskBody>,
) -> Result<(StatusCode, Json<TaskCreatedResponse>), ApiError> {
    let Json(body) = body?;
    let name = required(body.name, "name")?;
    let description = required(body.description, "description")?;
    let user = required(body.user, "user")?;
    let role = required(body.role, "role")?;

    let task = tracker
        .create_task(CreateTaskRequest::new(name, description, user, role))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(TaskCreatedResponse {
            message: "task created".to_owned(),
            task_id: task.id(),
        }),
    ))
}

/// `POST /tasks/{id}`: moves a task to another state.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for a non-integer id,
/// [`ApiError::Validation`] for a missing state and
/// [`ApiError::Tracker`] for rejected transitions.
pub async fn update_task_state<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
    path: TaskPath,
    body: JsonBody<UpdateTaskStateBody>,
) -> Result<Json<TaskUpdatedResponse>, ApiError> {
    let id = task_id(path)?;
    let Json(body) = body?;
    let state = required(body.state, "state")?;

    let task = tracker
        .update_task_state(UpdateTaskStateRequest::new(id, state))
        .await?;
    Ok(Json(TaskUpdatedResponse {
        message: "task state updated".to_owned(),
        task,
    }))
}

/// `POST /tasks/{id}/users`: adds or removes an assignee.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for a non-integer id,
/// [`ApiError::Validation`] for missing fields,
/// [`ApiError::Unprocessable`] for unknown actions and
/// [`ApiError::Tracker`] when the board rejects the edit.
pub async fn manage_task_users<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
    path: TaskPath,
    body: JsonBody<ManageTaskUsersBody>,
) -> Result<Json<TaskUpdatedResponse>, ApiError> {
    let id = task_id(path)?;
    let Json(body) = body?;
    let user = required(body.user, "user")?;
    let action = EditAction::parse(&required(body.action, "action")?)?;
    debug!(task_id = %id, ?action, "editing task users");

    let (task, message) = match action {
        EditAction::Add => {
            let role = required(body.role, "role")?;
            let task = tracker
                .assign_user_to_task(AssignUserRequest::new(id, user, role))
                .await?;
            (task, "user assigned")
        }
        EditAction::Remove => {
            let task = tracker.remove_user_from_task(id, &user).await?;
            (task, "user removed")
        }
    };
    Ok(Json(TaskUpdatedResponse {
        message: message.to_owned(),
        task,
    }))
}

/// `POST /tasks/{id}/dependencies`: adds or removes a dependency.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for a non-integer id,
/// [`ApiError::Validation`] for missing fields,
/// [`ApiError::Unprocessable`] for unknown actions or non-integer ids and
/// [`ApiError::Tracker`] when the board rejects the edit, including
/// self-dependencies.
pub async fn manage_task_dependencies<S: SnapshotStore>(
    State(tracker): State<SharedTracker<S>>,
    path: TaskPath,
    body: JsonBody<ManageTaskDependenciesBody>,
) -> Result<Json<TaskUpdatedResponse>, ApiError> {
    let id = task_id(path)?;
    let Json(body) = body?;
    let action_name = required(body.action, "action")?;
    let dependency = dependency_id(&body.dependency_task_id)?;
    let action = EditAction::parse(&action_name)?;
    if dependency == id {
        return Err(ApiError::Tracker(BoardError::SelfDependency(id).into()));
    }
    debug!(task_id = %id, dependency_id = %dependency, ?action, "editing task dependencies");

    let (task, message) = match action {
        EditAction::Add => (
            tracker.add_task_dependency(id, dependency).await?,
            "dependency added",
        ),
        EditAction::Remove => (
            tracker.remove_task_dependency(id, dependency).await?,
            "dependency removed",
        ),
    };
    Ok(Json(TaskUpdatedResponse {
        message: message.to_owned(),
        task,
    }))
}

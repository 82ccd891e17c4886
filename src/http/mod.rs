//! HTTP boundary for the task board.
//!
//! Provides endpoints for:
//! - Users (`/users`, `/users/alias={alias}`)
//! - Tasks (`/tasks`, `/tasks/{id}`)
//! - Task membership (`/tasks/{id}/users`)
//! - Task dependencies (`/tasks/{id}/dependencies`)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::board::{ports::SnapshotStore, services::TaskTrackerService};

mod error;
pub mod handlers;
pub mod responses;

pub use error::ApiError;

/// Tracker shared between request handlers.
pub type SharedTracker<S> = Arc<TaskTrackerService<S>>;

/// Create the HTTP router.
#[must_use]
pub fn create_router<S>(tracker: SharedTracker<S>) -> Router
where
    S: SnapshotStore + 'static,
{
    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<S>).post(handlers::create_user::<S>),
        )
        .route("/users/:selector", get(handlers::get_user_with_tasks::<S>))
        .route(
            "/tasks",
            get(handlers::list_tasks::<S>).post(handlers::create_task::<S>),
        )
        .route(
            "/tasks/:task_id",
            get(handlers::get_task::<S>).post(handlers::update_task_state::<S>),
        )
        .route("/tasks/:task_id/users", post(handlers::manage_task_users::<S>))
        .route(
            "/tasks/:task_id/dependencies",
            post(handlers::manage_task_dependencies::<S>),
        )
        .route("/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(tracker)
}

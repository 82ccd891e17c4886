//! Shared test helpers for in-memory tracker integration tests.

use std::sync::Arc;

use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemorySnapshotStore,
    services::{CreateTaskRequest, CreateUserRequest, TaskTrackerService},
};

/// Service type used by the in-memory tests.
pub type TestService = TaskTrackerService<InMemorySnapshotStore>;

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> Arc<InMemorySnapshotStore> {
    Arc::new(InMemorySnapshotStore::new())
}

/// Opens a tracker over `store`.
///
/// # Errors
///
/// Returns an error if the store cannot be loaded.
pub async fn open(store: &Arc<InMemorySnapshotStore>) -> Result<TestService, eyre::Report> {
    Ok(TaskTrackerService::open(Arc::clone(store)).await?)
}

/// Registers `dev1` and `qa1` and has `dev1` create one programmer task.
///
/// # Errors
///
/// Returns an error if any seeding operation fails.
pub async fn seed(service: &TestService) -> Result<(), eyre::Report> {
    service
        .create_user(CreateUserRequest::new("dev1", "Dev One"))
        .await?;
    service
        .create_user(CreateUserRequest::new("qa1", "QA One"))
        .await?;
    service
        .create_task(CreateTaskRequest::new(
            "Implement login",
            "Session handling",
            "dev1",
            "programmer",
        ))
        .await?;
    Ok(())
}

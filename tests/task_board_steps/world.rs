//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemorySnapshotStore,
    domain::{Task, TaskId},
    services::{TaskTrackerError, TaskTrackerService},
};
use tokio::sync::OnceCell;

/// Service type used by the BDD world.
pub type TestTrackerService = TaskTrackerService<InMemorySnapshotStore>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    store: Arc<InMemorySnapshotStore>,
    service: OnceCell<TestTrackerService>,
    pub last_result: Option<Result<Task, TaskTrackerError>>,
}

impl TaskBoardWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemorySnapshotStore::new()),
            service: OnceCell::new(),
            last_result: None,
        }
    }

    /// Returns the tracker, opening it on first use.
    pub fn service(&self) -> Result<&TestTrackerService, eyre::Report> {
        let service = run_async(
            self.service
                .get_or_try_init(|| TaskTrackerService::open(Arc::clone(&self.store))),
        )?;
        Ok(service)
    }

    /// Returns the current record of `task_id`.
    pub fn task(&self, task_id: u64) -> Result<Task, eyre::Report> {
        run_async(self.service()?.find_task(TaskId::new(task_id)))
            .ok_or_else(|| eyre::eyre!("task {task_id} is not on the board"))
    }

    /// Returns the error recorded by the last `When` step.
    pub fn last_error(&self) -> Result<&TaskTrackerError, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Err(err)) => Ok(err),
            Some(Ok(task)) => Err(eyre::eyre!(
                "expected a failure, but task {} was updated",
                task.id()
            )),
            None => Err(eyre::eyre!("no operation was attempted")),
        }
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

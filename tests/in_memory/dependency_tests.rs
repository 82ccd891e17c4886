//! Dependency edits and completion gating through the service.

use std::sync::Arc;

use super::helpers::{open, seed, store};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemorySnapshotStore,
    domain::{BoardError, TaskDomainError, TaskId, TaskState},
    services::{CreateTaskRequest, TaskTrackerError, UpdateTaskStateRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dependency_on_missing_task_does_not_mutate(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;
    let saves_before = store.save_count()?;

    let result = service
        .add_task_dependency(TaskId::FIRST, TaskId::new(2))
        .await;

    assert!(matches!(
        result,
        Err(TaskTrackerError::Board(BoardError::UnknownTask(_)))
    ));
    assert_eq!(store.save_count()?, saves_before);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_waits_for_every_dependency(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;
    for name in ["Create schema", "Provision database"] {
        service
            .create_task(CreateTaskRequest::new(name, "Prerequisite", "dev1", "infra"))
            .await?;
    }
    service.add_task_dependency(TaskId::FIRST, TaskId::new(2)).await?;
    service.add_task_dependency(TaskId::FIRST, TaskId::new(3)).await?;
    service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::FIRST, "in_progress"))
        .await?;
    for id in [2, 3] {
        service
            .update_task_state(UpdateTaskStateRequest::new(TaskId::new(id), "in_progress"))
            .await?;
    }
    service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::new(2), "done"))
        .await?;

    let blocked = service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::FIRST, "done"))
        .await;
    assert!(matches!(
        blocked,
        Err(TaskTrackerError::Board(BoardError::DependencyNotSatisfied(_)))
    ));

    service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::new(3), "done"))
        .await?;
    let done = service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::FIRST, "done"))
        .await?;
    assert_eq!(done.state(), TaskState::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dependency_rules_are_enforced(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;
    service
        .create_task(CreateTaskRequest::new("Create schema", "Tables", "dev1", "infra"))
        .await?;
    service.add_task_dependency(TaskId::FIRST, TaskId::new(2)).await?;

    let duplicate = service.add_task_dependency(TaskId::FIRST, TaskId::new(2)).await;
    let self_reference = service.add_task_dependency(TaskId::FIRST, TaskId::FIRST).await;
    let missing = service
        .remove_task_dependency(TaskId::new(2), TaskId::FIRST)
        .await;

    assert!(matches!(
        duplicate,
        Err(TaskTrackerError::Board(BoardError::Domain(
            TaskDomainError::DuplicateDependency { .. }
        )))
    ));
    assert!(matches!(
        self_reference,
        Err(TaskTrackerError::Board(BoardError::SelfDependency(_)))
    ));
    assert!(matches!(
        missing,
        Err(TaskTrackerError::Board(BoardError::Domain(
            TaskDomainError::DependencyNotFound { .. }
        )))
    ));
    Ok(())
}

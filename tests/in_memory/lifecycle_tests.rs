//! Lifecycle tests covering users, tasks and assignments.

use std::sync::Arc;

use super::helpers::{open, seed, store};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemorySnapshotStore,
    domain::{BoardError, Role, TaskId, TaskState},
    services::{
        AssignUserRequest, CreateTaskRequest, CreateUserRequest, TaskTrackerError,
        UpdateTaskStateRequest,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_opens_empty_board(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open(&store).await?;

    eyre::ensure!(service.list_users().await.is_empty(), "users present");
    eyre::ensure!(service.list_tasks().await.is_empty(), "tasks present");
    eyre::ensure!(store.save_count()? == 0, "opening must not save");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_linked_to_creator(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;

    let task = service
        .find_task(TaskId::FIRST)
        .await
        .ok_or_else(|| eyre::eyre!("task 1 missing"))?;
    let view = service
        .get_user_with_tasks("dev1")
        .await
        .ok_or_else(|| eyre::eyre!("dev1 missing"))?;

    assert_eq!(task.state(), TaskState::New);
    assert_eq!(task.creator_alias().as_str(), "dev1");
    assert_eq!(view.assigned_task_ids, [TaskId::FIRST]);
    assert_eq!(view.tasks, [task]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_ids_continue_after_reopen(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let first = open(&store).await?;
    seed(&first).await?;
    drop(first);

    let reopened = open(&store).await?;
    let task = reopened
        .create_task(CreateTaskRequest::new("Write tests", "Cover login", "qa1", "tester"))
        .await?;

    assert_eq!(task.id(), TaskId::new(2));
    assert_eq!(reopened.list_users().await.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_round_trip_updates_both_sides(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;

    let assigned = service
        .assign_user_to_task(AssignUserRequest::new(TaskId::FIRST, "qa1", " Tester "))
        .await?;
    let qa_view = service
        .get_user_with_tasks("qa1")
        .await
        .ok_or_else(|| eyre::eyre!("qa1 missing"))?;
    assert_eq!(assigned.assigned_users().len(), 2);
    assert_eq!(
        assigned.assigned_users().last().map(|entry| entry.role()),
        Some(Role::Tester)
    );
    assert_eq!(qa_view.assigned_task_ids, [TaskId::FIRST]);

    let removed = service.remove_user_from_task(TaskId::FIRST, "qa1").await?;
    let qa_after = service
        .get_user_with_tasks("qa1")
        .await
        .ok_or_else(|| eyre::eyre!("qa1 missing"))?;
    assert_eq!(removed.assigned_users().len(), 1);
    assert!(qa_after.assigned_task_ids.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_user_is_rejected(store: Arc<InMemorySnapshotStore>) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;

    let result = service
        .create_user(CreateUserRequest::new("qa1", "Another QA"))
        .await;

    assert!(matches!(
        result,
        Err(TaskTrackerError::Board(BoardError::DuplicateUser(_)))
    ));
    let names: Vec<_> = service
        .list_users()
        .await
        .iter()
        .map(|user| user.name().to_owned())
        .collect();
    assert_eq!(names, ["Dev One", "QA One"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_creator_is_rejected(store: Arc<InMemorySnapshotStore>) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;

    let result = service
        .create_task(CreateTaskRequest::new("Orphan", "No owner", "ghost", "infra"))
        .await;

    assert!(matches!(
        result,
        Err(TaskTrackerError::Board(BoardError::UnknownUser(_)))
    ));
    assert_eq!(service.list_tasks().await.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_task_cannot_reopen(store: Arc<InMemorySnapshotStore>) -> Result<(), eyre::Report> {
    let service = open(&store).await?;
    seed(&service).await?;
    service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::FIRST, "in_progress"))
        .await?;
    service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::FIRST, "done"))
        .await?;

    let result = service
        .update_task_state(UpdateTaskStateRequest::new(TaskId::FIRST, "in_progress"))
        .await;

    assert!(result.is_err());
    assert_eq!(
        service.find_task(TaskId::FIRST).await.map(|task| task.state()),
        Some(TaskState::Done)
    );
    Ok(())
}

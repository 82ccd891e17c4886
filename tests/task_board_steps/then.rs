//! Then steps for task board BDD scenarios.

use super::world::TaskBoardWorld;
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::{BoardError, Role, TaskDomainError, TaskState},
    services::TaskTrackerError,
};

#[then(r#"the task {task_id:u64} is in state "{state}""#)]
fn task_state_is(
    world: &TaskBoardWorld,
    task_id: u64,
    state: String,
) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let task = world.task(task_id)?;
    if task.state() != expected {
        return Err(eyre::eyre!(
            "expected state {}, found {}",
            expected.as_str(),
            task.state().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the task {task_id:u64} is assigned to "{alias}" as "{role}""#)]
fn task_assigned_to(
    world: &TaskBoardWorld,
    task_id: u64,
    alias: String,
    role: String,
) -> Result<(), eyre::Report> {
    let expected_role = Role::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid expected role in scenario: {err}"))?;
    let task = world.task(task_id)?;
    let found = task
        .assigned_users()
        .iter()
        .any(|entry| entry.user() == alias.as_str() && entry.role() == expected_role);
    if !found {
        return Err(eyre::eyre!(
            "expected {alias} as {role} on task {task_id}, found {:?}",
            task.assigned_users()
        ));
    }
    Ok(())
}

#[then("the task {task_id:u64} has no dependencies")]
fn task_has_no_dependencies(world: &TaskBoardWorld, task_id: u64) -> Result<(), eyre::Report> {
    let task = world.task(task_id)?;
    if !task.dependency_ids().is_empty() {
        return Err(eyre::eyre!(
            "expected no dependencies, found {:?}",
            task.dependency_ids()
        ));
    }
    Ok(())
}

#[then("the operation fails because the task is unknown")]
fn fails_unknown_task(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let err = world.last_error()?;
    if !matches!(err, TaskTrackerError::Board(BoardError::UnknownTask(_))) {
        return Err(eyre::eyre!("expected UnknownTask, got {err:?}"));
    }
    Ok(())
}

#[then("the operation fails because a dependency is not done")]
fn fails_dependency_not_done(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let err = world.last_error()?;
    if !matches!(
        err,
        TaskTrackerError::Board(BoardError::DependencyNotSatisfied(_))
    ) {
        return Err(eyre::eyre!("expected DependencyNotSatisfied, got {err:?}"));
    }
    Ok(())
}

#[then("the operation fails because the user is already assigned")]
fn fails_duplicate_assignment(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let err = world.last_error()?;
    if !matches!(
        err,
        TaskTrackerError::Board(BoardError::Domain(
            TaskDomainError::DuplicateAssignment { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected DuplicateAssignment, got {err:?}"));
    }
    Ok(())
}

#[then("the operation fails because the last user cannot be removed")]
fn fails_last_user(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let err = world.last_error()?;
    if !matches!(
        err,
        TaskTrackerError::Board(BoardError::Domain(TaskDomainError::LastUserViolation(_)))
    ) {
        return Err(eyre::eyre!("expected LastUserViolation, got {err:?}"));
    }
    Ok(())
}

#[then("the operation fails with an invalid transition")]
fn fails_invalid_transition(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let err = world.last_error()?;
    if !matches!(
        err,
        TaskTrackerError::Board(BoardError::Domain(TaskDomainError::InvalidTransition { .. }))
    ) {
        return Err(eyre::eyre!("expected InvalidTransition, got {err:?}"));
    }
    Ok(())
}

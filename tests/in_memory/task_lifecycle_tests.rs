//! Integration tests for task creation, editing, and the done lock.

use crate::in_memory::helpers::{Engine, create_task, engine, user_id};
use eyre::ensure;
use lifeledger::task::{
    domain::{Category, TaskDomainError, TaskStatus, UserId},
    services::{EditTaskRequest, TaskLifecycleError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_pending_and_listed(engine: Engine, user_id: UserId) -> eyre::Result<()> {
    let task = create_task(&engine, "Morning pages", Category::Awareness, user_id, true).await?;

    ensure!(task.status() == TaskStatus::Pending);
    ensure!(task.recurring());

    let listed = engine.lifecycle.list().await?;
    ensure!(listed.len() == 1);
    ensure!(listed.first().map(lifeledger::task::domain::Task::id) == Some(task.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_pending_in_progress_done(
    engine: Engine,
    user_id: UserId,
) -> eyre::Result<()> {
    let task = create_task(&engine, "Gym session", Category::BodyKinesthetic, user_id, false)
        .await?;

    let started = engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::InProgress)
        .await?;
    ensure!(started.task.status() == TaskStatus::InProgress);
    ensure!(!started.awarded);

    let finished = engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::Done)
        .await?;
    ensure!(finished.task.status() == TaskStatus::Done);
    ensure!(finished.awarded);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_lock_holds_across_every_entry_point(
    engine: Engine,
    user_id: UserId,
) -> eyre::Result<()> {
    let task = create_task(&engine, "Stretch", Category::Health, user_id, true).await?;
    engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::Done)
        .await?;

    let single = engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::InProgress)
        .await;
    ensure!(matches!(
        single,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::ForbiddenTransition { .. }
        ))
    ));

    let edit = engine
        .lifecycle
        .edit(task.id(), EditTaskRequest::new().with_title("Renamed"))
        .await;
    ensure!(matches!(
        edit,
        Err(TaskLifecycleError::Domain(TaskDomainError::TaskLocked(_)))
    ));

    let bulk = engine
        .lifecycle
        .bulk_transition(&[task.id()], TaskStatus::Pending)
        .await?;
    ensure!(bulk.updated_count == 0);

    let fetched = engine.lifecycle.find(task.id()).await?;
    let current = fetched.ok_or_else(|| eyre::eyre!("task should still exist"))?;
    ensure!(current.status() == TaskStatus::Done);
    ensure!(current.title().as_str() == "Stretch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_before_completion_updates_fields(engine: Engine, user_id: UserId) -> eyre::Result<()> {
    let task = create_task(&engine, "Pract'ce guitar", Category::Skills, user_id, true).await?;

    let edited = engine
        .lifecycle
        .edit(
            task.id(),
            EditTaskRequest::new()
                .with_title("Practice guitar")
                .with_recurring(false),
        )
        .await?;

    ensure!(edited.title().as_str() == "Practice guitar");
    ensure!(!edited.recurring());
    ensure!(edited.category() == Category::Skills);
    Ok(())
}

//! Integration tests for the recurring regeneration sweep.

use crate::in_memory::helpers::{Engine, create_task, engine, user_id};
use eyre::ensure;
use lifeledger::points::ports::PointsLedger;
use lifeledger::task::domain::{Category, TaskStatus, UserId};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn round_trip_resets_the_table_to_recurring_copies(
    engine: Engine,
    user_id: UserId,
) -> eyre::Result<()> {
    for index in 0..3 {
        let title = format!("Habit {index}");
        create_task(&engine, &title, Category::Health, user_id, true).await?;
    }
    for index in 0..2 {
        let title = format!("One-off {index}");
        create_task(&engine, &title, Category::Skills, user_id, false).await?;
    }

    let report = engine.regeneration.run().await?;

    ensure!(report.overdue_count == 5);
    ensure!(report.recurring_count == 3);
    ensure!(report.deleted_count == 5);
    ensure!(report.recreated_count == 3);

    let remaining = engine.lifecycle.list().await?;
    ensure!(remaining.len() == 3);
    for task in &remaining {
        ensure!(task.status() == TaskStatus::Pending);
        ensure!(task.recurring());
        ensure!(task.user_id() == user_id);
        ensure!(task.title().as_str().starts_with("Habit "));
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_keeps_recurring_and_drops_finished_one_shot(
    engine: Engine,
    user_id: UserId,
) -> eyre::Result<()> {
    let recurring = create_task(&engine, "Meditate", Category::Spirituality, user_id, true).await?;
    let finished = create_task(&engine, "Fix the bike", Category::Skills, user_id, false).await?;
    engine
        .lifecycle
        .transition_status(finished.id(), TaskStatus::Done)
        .await?;

    let report = engine.regeneration.run().await?;

    ensure!(report.overdue_count == 1);
    ensure!(report.recurring_count == 1);
    ensure!(report.recreated_count == 1);

    let remaining = engine.lifecycle.list().await?;
    ensure!(remaining.len() == 1);
    let copy = remaining
        .first()
        .ok_or_else(|| eyre::eyre!("expected one surviving task"))?;
    ensure!(copy.title().as_str() == "Meditate");
    ensure!(copy.category() == Category::Spirituality);
    ensure!(copy.user_id() == user_id);
    ensure!(copy.status() == TaskStatus::Pending);
    ensure!(copy.recurring());
    ensure!(copy.id() != recurring.id());

    ensure!(engine.lifecycle.find(finished.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn consecutive_sweeps_are_stable(engine: Engine, user_id: UserId) -> eyre::Result<()> {
    create_task(&engine, "Meditate", Category::Spirituality, user_id, true).await?;

    let first = engine.regeneration.run().await?;
    let second = engine.regeneration.run().await?;

    ensure!(first.recreated_count == 1);
    ensure!(second.overdue_count == 1);
    ensure!(second.recurring_count == 1);
    ensure!(second.deleted_count == 1);
    ensure!(second.recreated_count == 1);

    let remaining = engine.lifecycle.list().await?;
    ensure!(remaining.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_never_touches_the_ledger(engine: Engine, user_id: UserId) -> eyre::Result<()> {
    let task = create_task(&engine, "Meditate", Category::Spirituality, user_id, true).await?;
    engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::Done)
        .await?;

    let before = engine.ledger.get_or_create(user_id).await?;
    engine.regeneration.run().await?;
    let after = engine.ledger.get_or_create(user_id).await?;

    ensure!(before.total() == 1);
    ensure!(after.total() == before.total());
    Ok(())
}

//! Integration tests for exactly-once point awarding.

use crate::in_memory::helpers::{Engine, create_task, engine, user_id};
use eyre::ensure;
use lifeledger::points::{domain::Counter, ports::PointsLedger};
use lifeledger::task::domain::{Category, TaskStatus, UserId};
use rstest::rstest;

#[rstest]
#[case(Category::Spirituality, Counter::Meditation)]
#[case(Category::Intelligence, Counter::Brain)]
#[case(Category::Skills, Counter::Skills)]
#[case(Category::Health, Counter::Diet)]
#[case(Category::BodyKinesthetic, Counter::Training)]
#[case(Category::Awareness, Counter::Analyse)]
#[tokio::test(flavor = "multi_thread")]
async fn completion_awards_the_mapped_counter_only(
    engine: Engine,
    user_id: UserId,
    #[case] category: Category,
    #[case] expected: Counter,
) -> eyre::Result<()> {
    let task = create_task(&engine, "Categorised task", category, user_id, false).await?;

    engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::Done)
        .await?;

    let points = engine.ledger.get_or_create(user_id).await?;
    for counter in Counter::ALL {
        let expected_value = u64::from(counter == expected);
        ensure!(points.counter(counter) == expected_value);
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_bulk_awards_only_newly_done_tasks(
    engine: Engine,
    user_id: UserId,
) -> eyre::Result<()> {
    let eligible = create_task(&engine, "Meditate", Category::Spirituality, user_id, true).await?;
    let already_done = create_task(&engine, "Study", Category::Intelligence, user_id, true).await?;
    engine
        .lifecycle
        .transition_status(already_done.id(), TaskStatus::Done)
        .await?;

    let report = engine
        .lifecycle
        .bulk_transition(&[eligible.id(), already_done.id()], TaskStatus::Done)
        .await?;

    ensure!(report.updated_count == 1);
    ensure!(report.awarded_count == 1);

    let points = engine.ledger.get_or_create(user_id).await?;
    ensure!(points.counter(Counter::Meditation) == 1);
    ensure!(points.counter(Counter::Brain) == 1);
    ensure!(points.total() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_pending_transitions_never_award(
    engine: Engine,
    user_id: UserId,
) -> eyre::Result<()> {
    let task = create_task(&engine, "Meal prep", Category::Health, user_id, true).await?;

    engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::Pending)
        .await?;
    engine
        .lifecycle
        .transition_status(task.id(), TaskStatus::Pending)
        .await?;

    let points = engine.ledger.get_or_create(user_id).await?;
    ensure!(points.total() == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn awards_accrue_per_owner_not_per_caller(engine: Engine) -> eyre::Result<()> {
    let first_user = UserId::new();
    let second_user = UserId::new();
    let first = create_task(&engine, "Meditate", Category::Spirituality, first_user, true).await?;
    let second = create_task(&engine, "Meditate", Category::Spirituality, second_user, true).await?;

    engine
        .lifecycle
        .bulk_transition(&[first.id(), second.id()], TaskStatus::Done)
        .await?;

    let first_points = engine.ledger.get_or_create(first_user).await?;
    let second_points = engine.ledger.get_or_create(second_user).await?;
    ensure!(first_points.counter(Counter::Meditation) == 1);
    ensure!(second_points.counter(Counter::Meditation) == 1);
    Ok(())
}

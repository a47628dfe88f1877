//! Shared test helpers for in-memory integration tests.

use lifeledger::points::adapters::memory::InMemoryPointsLedger;
use lifeledger::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Category, Task, UserId},
    services::{CreateTaskRequest, RecurringRegenerationService, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Lifecycle service type used throughout the in-memory suite.
pub type TestLifecycle = TaskLifecycleService<InMemoryTaskStore, InMemoryPointsLedger, DefaultClock>;

/// Regeneration service type used throughout the in-memory suite.
pub type TestRegeneration = RecurringRegenerationService<InMemoryTaskStore, DefaultClock>;

/// Fully wired in-memory engine: both services sharing one store, plus
/// the ledger handle for award assertions.
pub struct Engine {
    /// Single and bulk lifecycle operations.
    pub lifecycle: TestLifecycle,
    /// The regeneration sweep over the same store.
    pub regeneration: TestRegeneration,
    /// Direct ledger access for verifying awards.
    pub ledger: Arc<InMemoryPointsLedger>,
}

/// Provides a freshly wired engine for each test.
#[fixture]
pub fn engine() -> Engine {
    let store = Arc::new(InMemoryTaskStore::new());
    let ledger = Arc::new(InMemoryPointsLedger::new());
    let clock = Arc::new(DefaultClock);
    let lifecycle = TaskLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&ledger),
        Arc::clone(&clock),
    );
    let regeneration = RecurringRegenerationService::new(store, clock);
    Engine {
        lifecycle,
        regeneration,
        ledger,
    }
}

/// Provides a user identifier for tests.
#[fixture]
pub fn user_id() -> UserId {
    UserId::new()
}

/// Creates a task through the public service API.
///
/// # Errors
///
/// Returns an error when creation fails.
pub async fn create_task(
    engine: &Engine,
    title: &str,
    category: Category,
    user_id: UserId,
    recurring: bool,
) -> eyre::Result<Task> {
    let task = engine
        .lifecycle
        .create(CreateTaskRequest::new(title, category, user_id).with_recurring(recurring))
        .await?;
    Ok(task)
}

//! The periodic recurring-task regeneration sweep.

use crate::task::{
    domain::Task,
    ports::{TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Counts reported by a completed regeneration sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerationReport {
    /// Live non-done tasks stamped overdue before the snapshot.
    pub overdue_count: u64,
    /// Recurring tasks snapshotted for recreation.
    pub recurring_count: u64,
    /// Rows removed by the wholesale delete, soft-deleted ones included.
    pub deleted_count: u64,
    /// Fresh pending copies inserted.
    pub recreated_count: u64,
}

/// Errors returned by the regeneration sweep.
#[derive(Debug, Error)]
pub enum RegenerationError {
    /// Store operation failed; the delete-and-recreate step rolls back
    /// as a unit, so the table is never left empty.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for regeneration operations.
pub type RegenerationResult<T> = Result<T, RegenerationError>;

/// Scheduled sweep that resets the task table to fresh pending copies
/// of the recurring tasks.
///
/// The sweep runs in four steps: stamp every live non-done task overdue,
/// snapshot the recurring set (whatever status its members now carry),
/// hard-delete every row, and insert a fresh pending copy per snapshot
/// entry. The delete and recreate run inside one store transaction —
/// the one window where a crash would otherwise lose the recurring set
/// irrecoverably. Points are never touched.
#[derive(Clone)]
pub struct RecurringRegenerationService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> RecurringRegenerationService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new regeneration service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Runs one full sweep and reports the step counts.
    ///
    /// Rerunning after a failure in the early steps is safe: stamping
    /// overdue is idempotent and the snapshot is taken fresh each run.
    ///
    /// # Errors
    ///
    /// Returns [`RegenerationError::Store`] when any step fails; the
    /// delete-and-recreate step leaves the table unchanged in that case.
    pub async fn run(&self) -> RegenerationResult<RegenerationReport> {
        let stamped_at = self.clock.utc();
        let overdue_count = self.store.mark_overdue_where_active(stamped_at).await?;

        let snapshot = self.store.find_recurring().await?;
        let recurring_count = snapshot.len() as u64;

        let replacements: Vec<Task> = snapshot
            .iter()
            .map(|task| task.regenerated(&*self.clock))
            .collect();
        let deleted_count = self.store.replace_all(&replacements).await?;

        Ok(RegenerationReport {
            overdue_count,
            recurring_count,
            deleted_count,
            recreated_count: replacements.len() as u64,
        })
    }
}

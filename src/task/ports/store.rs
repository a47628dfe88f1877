//! Store port for task persistence and the bulk mutations the lifecycle
//! and regeneration services rely on.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Every multi-row mutation (`transition_all`, `replace_all`,
/// `mark_overdue_where_active`) is all-or-nothing: implementations wrap
/// the rows in a single transaction and surface
/// [`TaskStoreError::Persistence`] on rollback, so partial application is
/// never observable.
///
/// Unless a method says otherwise, reads exclude soft-deleted rows
/// (`deleted_at` set).
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskStoreResult<()>;

    /// Persists changes to an existing task (status, title, recurring
    /// flag, timestamps, soft deletion).
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Persists a status transition for an existing task.
    ///
    /// The write is conditional on the stored status: a row that is
    /// already done is left untouched and reported as not written, so of
    /// two racing transitions into `done` exactly one observes `true`
    /// and awards. Returns whether the row was written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist
    /// or is soft deleted.
    async fn transition(&self, task: &Task) -> TaskStoreResult<bool>;

    /// Persists status transitions for a set of tasks atomically.
    ///
    /// Carries the same done guard as [`TaskStore::transition`] per row;
    /// guarded-out rows are skipped, not failed. Returns the identifiers
    /// actually written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for the first missing or
    /// soft-deleted task; no row is written in that case.
    async fn transition_all(&self, tasks: &[Task]) -> TaskStoreResult<Vec<TaskId>>;

    /// Finds a live task by identifier.
    ///
    /// Returns `None` when the task does not exist or is soft deleted.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns the live tasks matching the given identifiers.
    ///
    /// Unknown and soft-deleted identifiers are simply absent from the
    /// result; callers decide whether that is an error.
    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskStoreResult<Vec<Task>>;

    /// Returns every live task, table-wide.
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>>;

    /// Returns every live task with the recurring flag set, regardless
    /// of status.
    async fn find_recurring(&self) -> TaskStoreResult<Vec<Task>>;

    /// Stamps every live, non-done task overdue in one atomic update,
    /// using the supplied `updated_at` stamp.
    ///
    /// Returns the number of rows changed.
    async fn mark_overdue_where_active(&self, stamped_at: DateTime<Utc>) -> TaskStoreResult<u64>;

    /// Hard-deletes every row — live, done, and soft-deleted alike — and
    /// inserts the given replacement tasks, all in one transaction.
    ///
    /// Returns the number of rows deleted.
    async fn replace_all(&self, replacements: &[Task]) -> TaskStoreResult<u64>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure; any enclosing transaction rolled back.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TaskStoreError {
    fn from(err: diesel::result::Error) -> Self {
        // Lets store transactions use `?` on Diesel errors; semantic
        // variants (NotFound, DuplicateTask) are produced at call sites
        // where the identifiers are known.
        Self::persistence(err)
    }
}

//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is {0} characters, maximum is 255")]
    TitleTooLong(usize),

    /// A status change was attempted on a completed task.
    #[error("task {task_id} is done; status can no longer change (requested {requested})")]
    ForbiddenTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the caller requested.
        requested: TaskStatus,
    },

    /// An edit was attempted on a completed task.
    #[error("task {0} is done and can no longer be edited")]
    TaskLocked(TaskId),

    /// The requested status is only reachable via the regeneration sweep.
    #[error("status {0} cannot be set directly")]
    SweepOnlyTarget(TaskStatus),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseCategoryError(pub String);

//! Service layer for task creation, editing, and status transitions
//! with exactly-once point awarding.

use crate::points::ports::{PointsLedger, PointsLedgerError};
use crate::task::{
    domain::{Category, Task, TaskDomainError, TaskId, TaskStatus, TaskTitle, UserId},
    ports::{TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    category: Category,
    user_id: UserId,
    recurring: Option<bool>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    ///
    /// The recurring flag defaults to `true` when not set explicitly.
    #[must_use]
    pub fn new(title: impl Into<String>, category: Category, user_id: UserId) -> Self {
        Self {
            title: title.into(),
            category,
            user_id,
            recurring: None,
        }
    }

    /// Sets the recurring flag explicitly.
    #[must_use]
    pub const fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = Some(recurring);
        self
    }
}

/// Request payload for editing a task's mutable fields.
///
/// Category is deliberately not editable; status changes go through
/// [`TaskLifecycleService::transition_status`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    recurring: Option<bool>,
}

impl EditTaskRequest {
    /// Creates an empty edit request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            recurring: None,
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the recurring flag.
    #[must_use]
    pub const fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = Some(recurring);
        self
    }
}

/// Outcome of a single status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// The task after the transition.
    pub task: Task,
    /// Whether a point was awarded (the target was `done`).
    pub awarded: bool,
}

/// Outcome of a bulk status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkTransition {
    /// Number of tasks whose status actually changed; done tasks in the
    /// request are skipped, not counted.
    pub updated_count: u64,
    /// Number of point awards issued (tasks newly reaching `done`).
    pub awarded_count: u64,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] PointsLedgerError),

    /// The referenced task does not exist (or is soft deleted).
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A bulk request referenced tasks that do not exist; nothing was
    /// mutated.
    #[error("unknown task identifiers in bulk request: {}", format_ids(.0))]
    UnknownTasks(Vec<TaskId>),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

fn format_ids(ids: &[TaskId]) -> String {
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    rendered.join(", ")
}

/// Task lifecycle orchestration service.
///
/// Couples the status state machine to the points ledger: every entry
/// into `done` (and nothing else) triggers exactly one ledger increment,
/// issued only after the status write is durable.
#[derive(Clone)]
pub struct TaskLifecycleService<S, L, C>
where
    S: TaskStore,
    L: PointsLedger,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    ledger: Arc<L>,
    clock: Arc<C>,
}

impl<S, L, C> TaskLifecycleService<S, L, C>
where
    S: TaskStore,
    L: PointsLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            store,
            ledger,
            clock,
        }
    }

    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title fails
    /// validation, or [`TaskLifecycleError::Store`] when persistence
    /// rejects the insert.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let task = Task::new(
            title,
            request.category,
            request.user_id,
            request.recurring,
            &*self.clock,
        );
        self.store.store(&task).await?;
        Ok(task)
    }

    /// Moves a task to the given status, awarding a point when the
    /// target is `done`.
    ///
    /// The status write is guarded at the store against rows already
    /// done, so of two racing transitions into `done` only the one whose
    /// write lands awards. The write is persisted before the award so a
    /// ledger failure can never leave a point awarded without the task
    /// marked done, and a rejected status write never awards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Domain`] when the task is already
    /// done or the target is the sweep-only `overdue` status, and
    /// [`TaskLifecycleError::Store`] / [`TaskLifecycleError::Ledger`] on
    /// persistence failure.
    pub async fn transition_status(
        &self,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TaskLifecycleResult<StatusTransition> {
        if !target.is_selectable() {
            return Err(TaskDomainError::SweepOnlyTarget(target).into());
        }

        let mut task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;

        task.transition_to(target, &*self.clock)?;
        if !self.store.transition(&task).await? {
            // The row went done between the read and the write.
            return Err(TaskDomainError::ForbiddenTransition {
                task_id,
                requested: target,
            }
            .into());
        }

        let awarded = target == TaskStatus::Done;
        if awarded {
            self.ledger
                .increment(task.user_id(), task.category())
                .await?;
        }

        Ok(StatusTransition { task, awarded })
    }

    /// Updates a task's title and/or recurring flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist and [`TaskLifecycleError::Domain`] when the task is done
    /// (`TaskLocked`) or the new title fails validation.
    pub async fn edit(
        &self,
        task_id: TaskId,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;

        let title = request.title.map(TaskTitle::new).transpose()?;
        task.edit(title, request.recurring, &*self.clock)?;
        self.store.update(&task).await?;
        Ok(task)
    }

    /// Applies a status transition to a set of tasks.
    ///
    /// Every referenced task must exist; unknown identifiers fail the
    /// whole request before any mutation. Tasks already done are skipped
    /// silently (best-effort over the eligible subset). The eligible
    /// subset is written in one atomic, done-guarded update — rows that
    /// went done between the read and the write are skipped like the
    /// rest — then one point is awarded per row actually written when
    /// the target is `done`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownTasks`] when any identifier
    /// is unknown, [`TaskLifecycleError::Domain`] when the target is the
    /// sweep-only `overdue` status, and [`TaskLifecycleError::Store`] /
    /// [`TaskLifecycleError::Ledger`] on persistence failure.
    pub async fn bulk_transition(
        &self,
        task_ids: &[TaskId],
        target: TaskStatus,
    ) -> TaskLifecycleResult<BulkTransition> {
        if !target.is_selectable() {
            return Err(TaskDomainError::SweepOnlyTarget(target).into());
        }

        let found = self.store.find_by_ids(task_ids).await?;
        let found_ids: HashSet<TaskId> = found.iter().map(Task::id).collect();
        let missing: Vec<TaskId> = task_ids
            .iter()
            .filter(|id| !found_ids.contains(id))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(TaskLifecycleError::UnknownTasks(missing));
        }

        let mut eligible: Vec<Task> = found
            .into_iter()
            .filter(|task| !task.status().is_terminal())
            .collect();
        for task in &mut eligible {
            task.transition_to(target, &*self.clock)?;
        }
        let written = self.store.transition_all(&eligible).await?;
        let written_ids: HashSet<TaskId> = written.iter().copied().collect();

        let mut awarded_count: u64 = 0;
        if target == TaskStatus::Done {
            for task in eligible
                .iter()
                .filter(|task| written_ids.contains(&task.id()))
            {
                self.ledger
                    .increment(task.user_id(), task.category())
                    .await?;
                awarded_count += 1;
            }
        }

        Ok(BulkTransition {
            updated_count: written.len() as u64,
            awarded_count,
        })
    }

    /// Soft deletes a task, keeping the row for historical stats.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist or is already deleted.
    pub async fn delete(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        let mut task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;

        task.mark_deleted(&*self.clock);
        self.store.update(&task).await?;
        Ok(())
    }

    /// Retrieves a live task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist or is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the lookup fails.
    pub async fn find(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.store.find_by_id(task_id).await?)
    }

    /// Lists every live task, table-wide.
    ///
    /// Ownership scoping, where required, is applied by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the listing fails.
    pub async fn list(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.store.list_all().await?)
    }
}

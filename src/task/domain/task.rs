//! Task aggregate root.

use super::{Category, TaskDomainError, TaskId, TaskStatus, TaskTitle, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Once the status reaches [`TaskStatus::Done`] no operation mutates the
/// task again; completion is irreversible by design so points can be
/// awarded exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    category: Category,
    status: TaskStatus,
    recurring: bool,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted category.
    pub category: Category,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted recurring flag.
    pub recurring: bool,
    /// Persisted owning user.
    pub user_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// `recurring` defaults to `true` when unspecified, matching the
    /// tracker's habit-first workflow.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        category: Category,
        user_id: UserId,
        recurring: Option<bool>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title,
            category,
            status: TaskStatus::Pending,
            recurring: recurring.unwrap_or(true),
            user_id,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            category: data.category,
            status: data.status,
            recurring: data.recurring,
            user_id: data.user_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Creates the fresh copy of this task inserted by a regeneration
    /// sweep: same title, category, and owner; new identifier; status
    /// reset to pending and recurring forced on.
    #[must_use]
    pub fn regenerated(&self, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: self.title.clone(),
            category: self.category,
            status: TaskStatus::Pending,
            recurring: true,
            user_id: self.user_id,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns whether the task regenerates after a sweep.
    #[must_use]
    pub const fn recurring(&self) -> bool {
        self.recurring
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the task has been soft deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Moves the task to a directly selectable status.
    ///
    /// Re-selecting the current status is permitted and idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ForbiddenTransition`] when the task is
    /// already done, or [`TaskDomainError::SweepOnlyTarget`] when the
    /// target is [`TaskStatus::Overdue`].
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !target.is_selectable() {
            return Err(TaskDomainError::SweepOnlyTarget(target));
        }
        if self.status.is_terminal() {
            return Err(TaskDomainError::ForbiddenTransition {
                task_id: self.id,
                requested: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Updates the mutable task fields.
    ///
    /// Category is deliberately absent: it is fixed at creation so the
    /// points mapping of a past completion can never drift.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskLocked`] when the task is done.
    pub fn edit(
        &mut self,
        title: Option<TaskTitle>,
        recurring: Option<bool>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::TaskLocked(self.id));
        }
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(flag) = recurring {
            self.recurring = flag;
        }
        self.touch(clock);
        Ok(())
    }

    /// Stamps the task overdue during a regeneration sweep.
    ///
    /// Done tasks are left untouched; the sweep skips them. The caller
    /// supplies the stamp so every row in one sweep carries the same
    /// timestamp.
    pub fn mark_overdue(&mut self, stamped_at: DateTime<Utc>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = TaskStatus::Overdue;
        self.updated_at = stamped_at;
    }

    /// Soft deletes the task, keeping the row for historical stats.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

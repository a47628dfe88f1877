//! In-memory task store for tests and local wiring.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Soft-deleted rows stay in the map (mirroring `deleted_at` rows in the
/// database) and are filtered out by the read methods; only
/// [`TaskStore::replace_all`] removes them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory task store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Collects live (non-soft-deleted) tasks matching a predicate.
fn live_tasks_where(state: &InMemoryTaskState, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
    state
        .tasks
        .values()
        .filter(|task| !task.is_deleted() && predicate(task))
        .cloned()
        .collect()
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn store(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn transition(&self, task: &Task) -> TaskStoreResult<bool> {
        let mut state = self.write_state()?;
        let stored_status = match state.tasks.get(&task.id()) {
            Some(stored) if !stored.is_deleted() => stored.status(),
            _ => return Err(TaskStoreError::NotFound(task.id())),
        };
        if stored_status.is_terminal() {
            return Ok(false);
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(true)
    }

    async fn transition_all(&self, tasks: &[Task]) -> TaskStoreResult<Vec<TaskId>> {
        let mut state = self.write_state()?;
        // Validate the whole set before the first write so a missing row
        // leaves the store untouched, like a rolled-back transaction.
        for task in tasks {
            let known = state
                .tasks
                .get(&task.id())
                .is_some_and(|stored| !stored.is_deleted());
            if !known {
                return Err(TaskStoreError::NotFound(task.id()));
            }
        }
        let mut written = Vec::with_capacity(tasks.len());
        for task in tasks {
            let stored_done = state
                .tasks
                .get(&task.id())
                .is_some_and(|stored| stored.status().is_terminal());
            if stored_done {
                continue;
            }
            state.tasks.insert(task.id(), task.clone());
            written.push(task.id());
        }
        Ok(written)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read_state()?;
        let task = state
            .tasks
            .get(&id)
            .filter(|task| !task.is_deleted())
            .cloned();
        Ok(task)
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        let tasks = ids
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| !task.is_deleted())
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(live_tasks_where(&state, |_| true))
    }

    async fn find_recurring(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(live_tasks_where(&state, Task::recurring))
    }

    async fn mark_overdue_where_active(&self, stamped_at: DateTime<Utc>) -> TaskStoreResult<u64> {
        let mut state = self.write_state()?;
        let mut changed: u64 = 0;
        for task in state.tasks.values_mut() {
            if task.is_deleted() || task.status().is_terminal() {
                continue;
            }
            task.mark_overdue(stamped_at);
            changed += 1;
        }
        Ok(changed)
    }

    async fn replace_all(&self, replacements: &[Task]) -> TaskStoreResult<u64> {
        let mut state = self.write_state()?;
        let deleted = state.tasks.len() as u64;
        state.tasks.clear();
        for task in replacements {
            state.tasks.insert(task.id(), task.clone());
        }
        Ok(deleted)
    }
}

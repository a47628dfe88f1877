//! `PostgreSQL` store implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{Category, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn store(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTask(task_id)
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let row = to_new_row(task);

        self.run_blocking(move |connection| {
            let affected = update_row(connection, &row)?;
            if affected == 0 {
                return Err(TaskStoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn transition(&self, task: &Task) -> TaskStoreResult<bool> {
        let task_id = task.id();
        let status = task.status().as_str();
        let stamped_at = task.updated_at();

        self.run_blocking(move |connection| {
            let affected = transition_row(connection, task_id, status, stamped_at)?;
            if affected == 1 {
                return Ok(true);
            }
            if live_row_exists(connection, task_id)? {
                Ok(false)
            } else {
                Err(TaskStoreError::NotFound(task_id))
            }
        })
        .await
    }

    async fn transition_all(&self, tasks_to_write: &[Task]) -> TaskStoreResult<Vec<TaskId>> {
        let writes: Vec<(TaskId, &'static str, DateTime<Utc>)> = tasks_to_write
            .iter()
            .map(|task| (task.id(), task.status().as_str(), task.updated_at()))
            .collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|txn| {
                let mut written = Vec::with_capacity(writes.len());
                for (task_id, status, stamped_at) in &writes {
                    let affected = transition_row(txn, *task_id, status, *stamped_at)?;
                    if affected == 1 {
                        written.push(*task_id);
                        continue;
                    }
                    if !live_row_exists(txn, *task_id)? {
                        return Err(TaskStoreError::NotFound(*task_id));
                    }
                }
                Ok(written)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskStoreResult<Vec<Task>> {
        let raw_ids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(&raw_ids))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_recurring(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .filter(tasks::recurring.eq(true))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn mark_overdue_where_active(&self, stamped_at: DateTime<Utc>) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::status.ne(TaskStatus::Done.as_str()))
                    .filter(tasks::deleted_at.is_null()),
            )
            .set((
                tasks::status.eq(TaskStatus::Overdue.as_str()),
                tasks::updated_at.eq(stamped_at),
            ))
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            Ok(affected as u64)
        })
        .await
    }

    async fn replace_all(&self, replacements: &[Task]) -> TaskStoreResult<u64> {
        let rows: Vec<NewTaskRow> = replacements.iter().map(to_new_row).collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|txn| {
                let deleted = diesel::delete(tasks::table)
                    .execute(txn)
                    .map_err(TaskStoreError::persistence)?;
                diesel::insert_into(tasks::table)
                    .values(&rows)
                    .execute(txn)
                    .map_err(TaskStoreError::persistence)?;
                Ok(deleted as u64)
            })
        })
        .await
    }
}

/// Writes a status transition, guarded against rows already done.
///
/// The `status != 'done'` predicate runs inside the UPDATE itself, so
/// the database serialises racing writers: a row another transaction
/// just finished reports zero affected rows here instead of being
/// overwritten.
fn transition_row(
    connection: &mut PgConnection,
    task_id: TaskId,
    status: &str,
    stamped_at: DateTime<Utc>,
) -> TaskStoreResult<usize> {
    diesel::update(
        tasks::table
            .filter(tasks::id.eq(task_id.into_inner()))
            .filter(tasks::status.ne(TaskStatus::Done.as_str()))
            .filter(tasks::deleted_at.is_null()),
    )
    .set((
        tasks::status.eq(status),
        tasks::updated_at.eq(stamped_at),
    ))
    .execute(connection)
    .map_err(TaskStoreError::persistence)
}

fn live_row_exists(connection: &mut PgConnection, task_id: TaskId) -> TaskStoreResult<bool> {
    use diesel::dsl::{exists, select};

    select(exists(
        tasks::table
            .filter(tasks::id.eq(task_id.into_inner()))
            .filter(tasks::deleted_at.is_null()),
    ))
    .get_result(connection)
    .map_err(TaskStoreError::persistence)
}

/// Writes the full mutable row for a task; returns the affected count.
fn update_row(connection: &mut PgConnection, row: &NewTaskRow) -> TaskStoreResult<usize> {
    diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
        .set((
            tasks::title.eq(row.title.as_str()),
            tasks::status.eq(row.status.as_str()),
            tasks::recurring.eq(row.recurring),
            tasks::updated_at.eq(row.updated_at),
            tasks::deleted_at.eq(row.deleted_at),
        ))
        .execute(connection)
        .map_err(TaskStoreError::persistence)
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        category: task.category().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        recurring: task.recurring(),
        user_id: task.user_id().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        category: persisted_category,
        status: persisted_status,
        recurring,
        user_id,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskStoreError::persistence)?;
    let category =
        Category::try_from(persisted_category.as_str()).map_err(TaskStoreError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        category,
        status,
        recurring,
        user_id: UserId::from_uuid(user_id),
        created_at,
        updated_at,
        deleted_at,
    }))
}

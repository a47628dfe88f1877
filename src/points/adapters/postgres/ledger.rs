//! `PostgreSQL` ledger implementation for points persistence.

use super::{
    models::{NewPointsRow, PointsRow},
    schema::points,
};
use crate::points::{
    domain::{Counter, PersistedPointsData, PointsRecord},
    ports::{PointsLedger, PointsLedgerError, PointsLedgerResult},
};
use crate::task::domain::{Category, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by points adapters.
pub type PointsPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed points ledger.
#[derive(Debug, Clone)]
pub struct PostgresPointsLedger {
    pool: PointsPgPool,
}

impl PostgresPointsLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PointsPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PointsLedgerResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PointsLedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PointsLedgerError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PointsLedgerError::persistence)?
    }
}

/// Builds the zeroed row inserted on first access, with the counter for
/// `category` (when given) pre-set to 1 so the insert arm of an upsert
/// records the award itself.
fn seed_row(user_id: UserId, category: Option<Category>, timestamp: DateTime<Utc>) -> NewPointsRow {
    let mut row = NewPointsRow {
        user_id: user_id.into_inner(),
        meditation: 0,
        brain: 0,
        skills: 0,
        diet: 0,
        training: 0,
        analyse: 0,
        created_at: timestamp,
        updated_at: timestamp,
    };
    if let Some(awarded) = category {
        match Counter::for_category(awarded) {
            Counter::Meditation => row.meditation = 1,
            Counter::Brain => row.brain = 1,
            Counter::Skills => row.skills = 1,
            Counter::Diet => row.diet = 1,
            Counter::Training => row.training = 1,
            Counter::Analyse => row.analyse = 1,
        }
    }
    row
}

/// Runs the per-counter atomic upsert: insert the seed row, or bump the
/// existing row's column by one when the user already has a record.
macro_rules! upsert_counter {
    ($connection:expr, $row:expr, $timestamp:expr, $column:expr) => {
        diesel::insert_into(points::table)
            .values(&$row)
            .on_conflict(points::user_id)
            .do_update()
            .set(($column.eq($column + 1_i64), points::updated_at.eq($timestamp)))
            .execute($connection)
            .map_err(PointsLedgerError::persistence)
    };
}

#[async_trait]
impl PointsLedger for PostgresPointsLedger {
    async fn get_or_create(&self, user_id: UserId) -> PointsLedgerResult<PointsRecord> {
        self.run_blocking(move |connection| {
            let timestamp = Utc::now();
            let row = seed_row(user_id, None, timestamp);
            // Lost races fall through to the select below; the primary
            // key guarantees at most one row per user either way.
            diesel::insert_into(points::table)
                .values(&row)
                .on_conflict(points::user_id)
                .do_nothing()
                .execute(connection)
                .map_err(PointsLedgerError::persistence)?;

            let found = points::table
                .filter(points::user_id.eq(user_id.into_inner()))
                .select(PointsRow::as_select())
                .first::<PointsRow>(connection)
                .map_err(PointsLedgerError::persistence)?;
            row_to_record(found)
        })
        .await
    }

    async fn increment(&self, user_id: UserId, category: Category) -> PointsLedgerResult<()> {
        self.run_blocking(move |connection| {
            let timestamp = Utc::now();
            let row = seed_row(user_id, Some(category), timestamp);
            match Counter::for_category(category) {
                Counter::Meditation => {
                    upsert_counter!(connection, row, timestamp, points::meditation)?;
                }
                Counter::Brain => {
                    upsert_counter!(connection, row, timestamp, points::brain)?;
                }
                Counter::Skills => {
                    upsert_counter!(connection, row, timestamp, points::skills)?;
                }
                Counter::Diet => {
                    upsert_counter!(connection, row, timestamp, points::diet)?;
                }
                Counter::Training => {
                    upsert_counter!(connection, row, timestamp, points::training)?;
                }
                Counter::Analyse => {
                    upsert_counter!(connection, row, timestamp, points::analyse)?;
                }
            }
            Ok(())
        })
        .await
    }
}

fn row_to_record(row: PointsRow) -> PointsLedgerResult<PointsRecord> {
    let PointsRow {
        user_id,
        meditation,
        brain,
        skills,
        diet,
        training,
        analyse,
        created_at,
        updated_at,
        deleted_at,
    } = row;

    Ok(PointsRecord::from_persisted(PersistedPointsData {
        user_id: UserId::from_uuid(user_id),
        meditation: to_counter_value(meditation)?,
        brain: to_counter_value(brain)?,
        skills: to_counter_value(skills)?,
        diet: to_counter_value(diet)?,
        training: to_counter_value(training)?,
        analyse: to_counter_value(analyse)?,
        created_at,
        updated_at,
        deleted_at,
    }))
}

/// Converts a persisted counter column to the domain value.
///
/// Counters are never decremented, so a negative value can only come
/// from manual tampering; it is surfaced as a persistence error rather
/// than silently clamped.
fn to_counter_value(value: i64) -> PointsLedgerResult<u64> {
    u64::try_from(value).map_err(PointsLedgerError::persistence)
}

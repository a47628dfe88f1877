//! Diesel row models for points persistence.

use super::schema::points;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for points records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PointsRow {
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Spirituality counter.
    pub meditation: i64,
    /// Intelligence counter.
    pub brain: i64,
    /// Skills counter.
    pub skills: i64,
    /// Health counter.
    pub diet: i64,
    /// Body-kinesthetic counter.
    pub training: i64,
    /// Awareness counter.
    pub analyse: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last award timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for points records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = points)]
pub struct NewPointsRow {
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Spirituality counter.
    pub meditation: i64,
    /// Intelligence counter.
    pub brain: i64,
    /// Skills counter.
    pub skills: i64,
    /// Health counter.
    pub diet: i64,
    /// Body-kinesthetic counter.
    pub training: i64,
    /// Awareness counter.
    pub analyse: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last award timestamp.
    pub updated_at: DateTime<Utc>,
}

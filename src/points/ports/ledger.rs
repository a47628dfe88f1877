//! Ledger port for per-user points persistence.

use crate::points::domain::PointsRecord;
use crate::task::domain::{Category, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for points ledger operations.
pub type PointsLedgerResult<T> = Result<T, PointsLedgerError>;

/// Points persistence contract.
#[async_trait]
pub trait PointsLedger: Send + Sync {
    /// Returns the user's points record, creating it at zero on first
    /// access.
    ///
    /// Implementations must create at most one record per user under
    /// concurrent first access (unique key on the user plus upsert
    /// semantics rather than check-then-insert).
    ///
    /// # Errors
    ///
    /// Returns [`PointsLedgerError::Persistence`] when the store rejects
    /// the operation.
    async fn get_or_create(&self, user_id: UserId) -> PointsLedgerResult<PointsRecord>;

    /// Atomically adds 1 to the counter mapped from `category`, creating
    /// the record first when absent.
    ///
    /// Implementations must use a single atomic increment statement (or
    /// equivalent locking) so concurrent awards for the same user are
    /// never lost to read-then-write races.
    ///
    /// # Errors
    ///
    /// Returns [`PointsLedgerError::Persistence`] when the store rejects
    /// the operation; no award is recorded in that case.
    async fn increment(&self, user_id: UserId, category: Category) -> PointsLedgerResult<()>;
}

/// Errors returned by points ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum PointsLedgerError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PointsLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for PointsLedgerError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

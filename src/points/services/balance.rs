//! Service layer for reading a user's points balance.

use crate::points::{
    domain::PointsRecord,
    ports::{PointsLedger, PointsLedgerError},
};
use crate::task::domain::UserId;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for points balance operations.
#[derive(Debug, Error)]
pub enum PointsServiceError {
    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] PointsLedgerError),
}

/// Result type for points balance service operations.
pub type PointsServiceResult<T> = Result<T, PointsServiceError>;

/// Points balance read service.
///
/// Awarding goes through the task lifecycle service; this service only
/// exposes the lazily created balance to dashboard-style callers.
#[derive(Clone)]
pub struct PointsService<L>
where
    L: PointsLedger,
{
    ledger: Arc<L>,
}

impl<L> PointsService<L>
where
    L: PointsLedger,
{
    /// Creates a new points balance service.
    #[must_use]
    pub const fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Returns the user's points record, creating it at zero on first
    /// access.
    ///
    /// # Errors
    ///
    /// Returns [`PointsServiceError::Ledger`] when persistence fails.
    pub async fn get_or_create(&self, user_id: UserId) -> PointsServiceResult<PointsRecord> {
        Ok(self.ledger.get_or_create(user_id).await?)
    }
}

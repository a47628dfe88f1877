//! In-memory points ledger for tests and local wiring.

use async_trait::async_trait;
use mockable::DefaultClock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::points::{
    domain::PointsRecord,
    ports::{PointsLedger, PointsLedgerError, PointsLedgerResult},
};
use crate::task::domain::{Category, UserId};

/// Thread-safe in-memory points ledger.
///
/// The single write lock around the map stands in for the database's
/// atomic increment: an award is read-modify-write under exclusive
/// access, so concurrent awards cannot be lost.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPointsLedger {
    state: Arc<RwLock<HashMap<UserId, PointsRecord>>>,
}

impl InMemoryPointsLedger {
    /// Creates an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PointsLedger for InMemoryPointsLedger {
    async fn get_or_create(&self, user_id: UserId) -> PointsLedgerResult<PointsRecord> {
        let mut state = self.state.write().map_err(|err| {
            PointsLedgerError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let record = state
            .entry(user_id)
            .or_insert_with(|| PointsRecord::new(user_id, &DefaultClock));
        Ok(record.clone())
    }

    async fn increment(&self, user_id: UserId, category: Category) -> PointsLedgerResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PointsLedgerError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let clock = DefaultClock;
        state
            .entry(user_id)
            .or_insert_with(|| PointsRecord::new(user_id, &clock))
            .record_completion(category, &clock);
        Ok(())
    }
}

//! Per-user points record aggregate.

use super::Counter;
use crate::task::domain::{Category, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Per-user accumulator of the six category counters.
///
/// Created lazily at zero on first access; counters only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRecord {
    user_id: UserId,
    meditation: u64,
    brain: u64,
    skills: u64,
    diet: u64,
    training: u64,
    analyse: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted points record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPointsData {
    /// Owning user.
    pub user_id: UserId,
    /// Persisted meditation counter.
    pub meditation: u64,
    /// Persisted brain counter.
    pub brain: u64,
    /// Persisted skills counter.
    pub skills: u64,
    /// Persisted diet counter.
    pub diet: u64,
    /// Persisted training counter.
    pub training: u64,
    /// Persisted analyse counter.
    pub analyse: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest award timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PointsRecord {
    /// Creates a fresh record with every counter at zero.
    #[must_use]
    pub fn new(user_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            user_id,
            meditation: 0,
            brain: 0,
            skills: 0,
            diet: 0,
            training: 0,
            analyse: 0,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedPointsData) -> Self {
        Self {
            user_id: data.user_id,
            meditation: data.meditation,
            brain: data.brain,
            skills: data.skills,
            diet: data.diet,
            training: data.training,
            analyse: data.analyse,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the current value of a counter.
    #[must_use]
    pub const fn counter(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Meditation => self.meditation,
            Counter::Brain => self.brain,
            Counter::Skills => self.skills,
            Counter::Diet => self.diet,
            Counter::Training => self.training,
            Counter::Analyse => self.analyse,
        }
    }

    /// Returns the counter value awarded for the given task category.
    #[must_use]
    pub const fn counter_for(&self, category: Category) -> u64 {
        self.counter(Counter::for_category(category))
    }

    /// Returns the sum of all six counters.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.meditation + self.brain + self.skills + self.diet + self.training + self.analyse
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest award timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Adds exactly one point to the counter mapped from `category`.
    pub fn record_completion(&mut self, category: Category, clock: &impl Clock) {
        let slot = match Counter::for_category(category) {
            Counter::Meditation => &mut self.meditation,
            Counter::Brain => &mut self.brain,
            Counter::Skills => &mut self.skills,
            Counter::Diet => &mut self.diet,
            Counter::Training => &mut self.training,
            Counter::Analyse => &mut self.analyse,
        };
        *slot += 1;
        self.updated_at = clock.utc();
    }
}

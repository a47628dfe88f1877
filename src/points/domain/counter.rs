//! Ledger counters and their category mapping.

use crate::task::domain::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six per-user ledger counters.
///
/// The category mapping is fixed and exhaustive; changing it would
/// silently reattribute past awards, so both directions live in this one
/// `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    /// Awarded for spirituality tasks.
    Meditation,
    /// Awarded for intelligence tasks.
    Brain,
    /// Awarded for skills tasks.
    Skills,
    /// Awarded for health tasks.
    Diet,
    /// Awarded for body-kinesthetic tasks.
    Training,
    /// Awarded for awareness tasks.
    Analyse,
}

impl Counter {
    /// All counters, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Meditation,
        Self::Brain,
        Self::Skills,
        Self::Diet,
        Self::Training,
        Self::Analyse,
    ];

    /// Returns the counter awarded for completing a task of `category`.
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Spirituality => Self::Meditation,
            Category::Intelligence => Self::Brain,
            Category::Skills => Self::Skills,
            Category::Health => Self::Diet,
            Category::BodyKinesthetic => Self::Training,
            Category::Awareness => Self::Analyse,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meditation => "meditation",
            Self::Brain => "brain",
            Self::Skills => "skills",
            Self::Diet => "diet",
            Self::Training => "training",
            Self::Analyse => "analyse",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Fixed life-domain categories a task belongs to.

use super::ParseCategoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Life-domain category assigned to a task at creation.
///
/// Immutable for the lifetime of the task; each category maps 1:1 to a
/// points counter (see [`Counter`](crate::points::domain::Counter)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Meditation, reflection, and related practice.
    Spirituality,
    /// Study and mental exercise.
    Intelligence,
    /// Deliberate skill-building.
    Skills,
    /// Diet and general health upkeep.
    Health,
    /// Physical training.
    BodyKinesthetic,
    /// Self-analysis and awareness work.
    Awareness,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Spirituality,
        Self::Intelligence,
        Self::Skills,
        Self::Health,
        Self::BodyKinesthetic,
        Self::Awareness,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spirituality => "spirituality",
            Self::Intelligence => "intelligence",
            Self::Skills => "skills",
            Self::Health => "health",
            Self::BodyKinesthetic => "body_kinesthetic",
            Self::Awareness => "awareness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "spirituality" => Ok(Self::Spirituality),
            "intelligence" => Ok(Self::Intelligence),
            "skills" => Ok(Self::Skills),
            "health" => Ok(Self::Health),
            "body_kinesthetic" => Ok(Self::BodyKinesthetic),
            "awareness" => Ok(Self::Awareness),
            _ => Err(ParseCategoryError(value.to_owned())),
        }
    }
}

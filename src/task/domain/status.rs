//! Task lifecycle status and its transition rules.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// The state machine is deliberately permissive between the live states
/// and absolute about the terminal one: any of `Pending`, `InProgress`,
/// or `Overdue` may move to any directly selectable status, while `Done`
/// locks the task forever. `Overdue` is stamped only by the regeneration
/// sweep and is never a valid direct target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is waiting to be started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed; terminal.
    Done,
    /// Task lapsed without completion before a regeneration sweep.
    Overdue,
}

impl TaskStatus {
    /// All statuses, in declaration order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Done, Self::Overdue];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Overdue => "overdue",
        }
    }

    /// Returns `true` when no further transition or edit is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns `true` when callers may request this status directly.
    ///
    /// `Overdue` is excluded: it is applied only by the regeneration
    /// sweep, never through [`transition_to`](super::Task::transition_to).
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        !matches!(self, Self::Overdue)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

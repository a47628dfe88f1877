//! Domain model for the per-user points ledger.

mod counter;
mod record;

pub use counter::Counter;
pub use record::{PersistedPointsData, PointsRecord};

//! In-memory adapters for points persistence.

mod ledger;

pub use ledger::InMemoryPointsLedger;

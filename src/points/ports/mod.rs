//! Port contracts for the points ledger.

pub mod ledger;

pub use ledger::{PointsLedger, PointsLedgerError, PointsLedgerResult};

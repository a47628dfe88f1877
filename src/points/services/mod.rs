//! Orchestration services for the points ledger.

pub mod balance;

pub use balance::{PointsService, PointsServiceError, PointsServiceResult};

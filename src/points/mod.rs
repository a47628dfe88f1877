//! Points ledger for Lifeledger.
//!
//! Each user owns a single lazily created points record with six
//! counters, one per task category. A counter is incremented exactly
//! once each time one of the user's tasks enters the terminal `done`
//! status; counters are never decremented. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

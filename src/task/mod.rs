//! Task lifecycle management for Lifeledger.
//!
//! This module implements the task status state machine (with its
//! irreversible `done` lock), single and bulk status transitions with
//! exactly-once point awarding, task editing, and the destructive
//! recurring-task regeneration sweep. The module follows hexagonal
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

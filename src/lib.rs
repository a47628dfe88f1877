//! Lifeledger: personal productivity task and points engine.
//!
//! This crate provides the core functionality behind a gamified task
//! tracker: a restricted task status state machine, a per-user points
//! ledger awarded on task completion, bulk status operations, and the
//! periodic recurring-task regeneration sweep.
//!
//! # Architecture
//!
//! Lifeledger follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, bulk transitions, recurring regeneration
//! - [`points`]: Per-user category counters awarded on completion

pub mod points;
pub mod task;

//! Adapter implementations of the points ports.

pub mod memory;
pub mod postgres;

//! Shared test utilities used across edgewalk crates.

pub mod ci;
pub mod env;
pub mod tracing;

//! Unit tests for the cache model.

/// Cache top, storage, match engine, handlers, and policies.
pub mod cache;

/// Shared primitives (address layout, encoder, flop).
pub mod common;


/// Scenario format and replay driver.
pub mod sim;

//! Scenario replay.
//!
//! The cache itself has no file, CLI, or wire surface; this module supplies
//! the minimal harness around it:
//! 1. **Trace:** Serde-deserialized per-cycle stimulus and the JSON loader.
//! 2. **Runner:** Replays a scenario cycle by cycle against a cache,
//!    collecting every port's outputs.
//! 3. **Stimulus:** Deterministic address streams expanded into synthetic
//!    fill/read sweeps.
//! 4. **Checking:** A differential mirror of the resident set that verifies
//!    every read and eviction a replay produces.

/// Differential scenario checking.
pub mod check;

/// Scenario replay driver.
pub mod runner;

/// Deterministic stimulus generation.
pub mod stimgen;

/// Scenario format and loading.
pub mod trace;

pub use check::{check_scenario, CheckError, CheckOutcome, MirrorModel};
pub use runner::{CycleReport, Runner};
pub use stimgen::{fill_then_read, AddressStream, LfsrStream, StridedStream};
pub use trace::{load_scenario, Scenario, ScenarioError, TraceCycle};

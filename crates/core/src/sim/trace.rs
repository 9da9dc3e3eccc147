//! Scenario format.
//!
//! A scenario is the cache's parameters plus an ordered list of cycles, each
//! naming the fill and read stimulus presented that cycle. Ports not named in
//! a cycle are idle. JSON is the interchange format:
//!
//! ```json
//! {
//!     "cache": { "ways": 4, "lines": 1, "policy": "AvailableInvalidated" },
//!     "cycles": [
//!         { "fills": [ { "addr": 200, "data": 3735928559 } ] },
//!         { "reads": [ { "addr": 200 } ] }
//!     ]
//! }
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;
use crate::config::CacheParams;

/// A full replayable scenario: cache parameters and per-cycle stimulus.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Parameters the cache is constructed from.
    pub cache: CacheParams,

    /// Stimulus, one entry per clock cycle.
    #[serde(default)]
    pub cycles: Vec<TraceCycle>,
}

/// Stimulus for one clock cycle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceCycle {
    /// Fill requests presented this cycle.
    #[serde(default)]
    pub fills: Vec<FillStim>,

    /// Read requests presented this cycle.
    #[serde(default)]
    pub reads: Vec<ReadStim>,
}

/// One fill request in a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct FillStim {
    /// Fill port index
    #[serde(default)]
    pub port: usize,

    /// Request address
    pub addr: u64,

    /// Payload; ignored when `valid` is false
    #[serde(default)]
    pub data: u64,

    /// Install when true (the default), invalidate when false
    #[serde(default = "FillStim::default_valid")]
    pub valid: bool,
}

impl FillStim {
    /// Fills install unless the scenario says otherwise.
    fn default_valid() -> bool {
        true
    }
}

/// One read request in a scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadStim {
    /// Read port index
    #[serde(default)]
    pub port: usize,

    /// Request address
    pub addr: u64,

    /// Issue as read-with-invalidate
    #[serde(default)]
    pub invalidate: bool,
}

/// Failure to load or validate a scenario file.
#[derive(Debug)]
pub enum ScenarioError {
    /// The file could not be read.
    Io(io::Error),
    /// The contents were not a valid scenario.
    Parse(serde_json::Error),
    /// The scenario's cache parameters failed validation.
    Config(ConfigError),
    /// A stimulus named a port the cache does not have.
    PortOutOfRange {
        /// Cycle index of the offending stimulus.
        cycle: usize,
        /// The port index named.
        port: usize,
        /// Number of ports of that kind the cache has.
        ports: usize,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(err) => write!(f, "reading scenario: {}", err),
            ScenarioError::Parse(err) => write!(f, "parsing scenario: {}", err),
            ScenarioError::Config(err) => write!(f, "cache parameters: {}", err),
            ScenarioError::PortOutOfRange { cycle, port, ports } => write!(
                f,
                "cycle {}: port {} out of range (cache has {})",
                cycle, port, ports
            ),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Io(err) => Some(err),
            ScenarioError::Parse(err) => Some(err),
            ScenarioError::Config(err) => Some(err),
            ScenarioError::PortOutOfRange { .. } => None,
        }
    }
}

impl Scenario {
    /// Checks every stimulus against the configured port counts.
    pub fn validate_ports(&self) -> Result<(), ScenarioError> {
        for (cycle, stim) in self.cycles.iter().enumerate() {
            for fill in &stim.fills {
                if fill.port >= self.cache.fill_ports {
                    return Err(ScenarioError::PortOutOfRange {
                        cycle,
                        port: fill.port,
                        ports: self.cache.fill_ports,
                    });
                }
            }
            for read in &stim.reads {
                if read.port >= self.cache.read_ports {
                    return Err(ScenarioError::PortOutOfRange {
                        cycle,
                        port: read.port,
                        ports: self.cache.read_ports,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Loads and validates a scenario from a JSON file.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let contents = fs::read_to_string(path).map_err(ScenarioError::Io)?;
    let scenario: Scenario = serde_json::from_str(&contents).map_err(ScenarioError::Parse)?;
    scenario.validate_ports()?;
    Ok(scenario)
}

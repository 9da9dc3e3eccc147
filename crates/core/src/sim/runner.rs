//! Scenario replay driver.
//!
//! Maps a [`Scenario`]'s stimulus onto the cache's port bundles and steps the
//! clock once per trace cycle, recording what every output port did.

use crate::cache::ports::{CycleOutputs, FillReq, ReadReq};
use crate::cache::Cache;
use crate::stats::CacheStats;

use super::trace::{Scenario, ScenarioError, TraceCycle};

/// One replayed cycle: its index and every port's outputs.
#[derive(Clone, Debug)]
pub struct CycleReport {
    /// Zero-based cycle index.
    pub cycle: usize,
    /// The cache's combinational outputs that cycle.
    pub outputs: CycleOutputs,
}

/// Replays a scenario against a freshly constructed cache.
pub struct Runner {
    cache: Cache,
    cycles: Vec<TraceCycle>,
}

impl Runner {
    /// Validates the scenario and builds the cache it names.
    ///
    /// # Errors
    ///
    /// Fails fast on invalid cache parameters or stimulus port indices the
    /// cache does not have.
    pub fn new(scenario: &Scenario) -> Result<Self, ScenarioError> {
        scenario.validate_ports()?;
        Ok(Self {
            cache: Cache::new(&scenario.cache).map_err(ScenarioError::Config)?,
            cycles: scenario.cycles.clone(),
        })
    }

    /// Replays every cycle, returning one report per cycle.
    pub fn run(&mut self) -> Vec<CycleReport> {
        let fill_ports = self.cache.params().fill_ports;
        let read_ports = self.cache.params().read_ports;

        let mut reports = Vec::with_capacity(self.cycles.len());
        for (index, stim) in self.cycles.iter().enumerate() {
            let mut fills = vec![FillReq::idle(); fill_ports];
            for fill in &stim.fills {
                fills[fill.port] = FillReq {
                    en: true,
                    valid: fill.valid,
                    addr: fill.addr,
                    data: fill.data,
                };
            }
            let mut reads = vec![ReadReq::idle(); read_ports];
            for read in &stim.reads {
                reads[read.port] = ReadReq {
                    en: true,
                    addr: read.addr,
                    invalidate: read.invalidate,
                };
            }
            reports.push(CycleReport {
                cycle: index,
                outputs: self.cache.cycle(&fills, &reads),
            });
        }
        reports
    }

    /// The cache under replay.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &CacheStats {
        &self.cache.stats
    }
}

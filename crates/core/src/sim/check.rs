//! Differential scenario checking.
//!
//! Replays a scenario while shadowing the cache with a [`MirrorModel`]: a
//! policy-agnostic map of the addresses that must currently be resident. The
//! mirror needs no knowledge of replacement (the cache's own eviction
//! outputs say exactly which address each fill displaced), so every read's
//! valid bit and data become fully predictable and any disagreement is a
//! divergence.
//!
//! The mirror resolves one request per address per cycle. Scenarios that
//! force same-way write conflicts (several fill ports installing the same
//! address, or more simultaneous allocations than available ways) are
//! outside its scope; ordinary multi-port traffic on distinct addresses is
//! fine.

use std::collections::HashMap;
use std::fmt;

use crate::cache::ports::ReadResp;
use crate::common::width_mask;
use crate::config::CacheParams;
use crate::stats::CacheStats;

use super::runner::Runner;
use super::trace::{Scenario, ScenarioError};

/// Shadow of the cache's resident set, keyed by masked address.
///
/// Fills insert, reported evictions and invalidations remove, and
/// read-with-invalidate clears are applied with the cache's one-cycle
/// deferral: a clear captured in cycle `t` takes effect after cycle `t + 1`,
/// so the immediately following read still expects a hit.
pub struct MirrorModel {
    resident: HashMap<u64, u64>,
    /// Clears taking effect at the end of the current cycle.
    armed: Vec<u64>,
    /// Clears captured this cycle; armed at the cycle boundary.
    fresh: Vec<u64>,
    addr_mask: u64,
    data_mask: u64,
}

impl MirrorModel {
    /// Creates an empty mirror for a cache built from `params`.
    pub fn new(params: &CacheParams) -> Self {
        Self {
            resident: HashMap::new(),
            armed: Vec::new(),
            fresh: Vec::new(),
            addr_mask: width_mask(params.addr_width),
            data_mask: width_mask(params.data_width),
        }
    }

    /// Number of addresses currently expected to be resident.
    pub fn resident_count(&self) -> usize {
        self.resident.len()
    }

    /// Records an installing fill of `(addr, data)`.
    ///
    /// A fill of an address with a clear in flight refreshes the entry, so
    /// the pending clear is cancelled, mirroring the cache, where the
    /// refill's valid write lands after the deferred clear's.
    pub fn note_fill(&mut self, addr: u64, data: u64) {
        let addr = addr & self.addr_mask;
        self.resident.insert(addr, data & self.data_mask);
        self.armed.retain(|&a| a != addr);
        self.fresh.retain(|&a| a != addr);
    }

    /// Records a reported eviction or invalidation of `(addr, data)`.
    ///
    /// The address must be resident with exactly that data; the cache never
    /// displaces something it was not holding.
    pub fn note_eviction(&mut self, addr: u64, data: u64) -> Result<(), String> {
        let addr = addr & self.addr_mask;
        match self.resident.remove(&addr) {
            Some(expected) if expected == data => Ok(()),
            Some(expected) => Err(format!(
                "eviction of {:#x} carried {:#x}, expected {:#x}",
                addr, data, expected
            )),
            None => Err(format!("eviction of non-resident address {:#x}", addr)),
        }
    }

    /// Checks a read response against the resident set.
    pub fn expect_read(&self, addr: u64, resp: ReadResp) -> Result<(), String> {
        let addr = addr & self.addr_mask;
        match (self.resident.get(&addr), resp.valid) {
            (Some(&data), true) if data == resp.data => Ok(()),
            (Some(&data), true) => Err(format!(
                "read of {:#x} returned {:#x}, expected {:#x}",
                addr, resp.data, data
            )),
            (Some(_), false) => Err(format!("read of resident {:#x} missed", addr)),
            (None, true) => Err(format!("read of non-resident {:#x} hit", addr)),
            (None, false) => Ok(()),
        }
    }

    /// Captures a read-with-invalidate hit on `addr` for deferred clearing.
    pub fn arm_clear(&mut self, addr: u64) {
        self.fresh.push(addr & self.addr_mask);
    }

    /// Cycle boundary: apply the armed clears and arm the fresh ones.
    pub fn end_cycle(&mut self) {
        for addr in self.armed.drain(..) {
            self.resident.remove(&addr);
        }
        std::mem::swap(&mut self.armed, &mut self.fresh);
    }
}

/// Failure of a differential check.
#[derive(Debug)]
pub enum CheckError {
    /// The scenario itself did not load or validate.
    Scenario(ScenarioError),
    /// The scenario uses a shape the mirror cannot resolve.
    Unsupported(String),
    /// The cache and the mirror disagreed.
    Divergence {
        /// Cycle at which the disagreement surfaced.
        cycle: usize,
        /// What disagreed.
        detail: String,
    },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Scenario(err) => write!(f, "scenario: {}", err),
            CheckError::Unsupported(what) => write!(f, "unsupported scenario: {}", what),
            CheckError::Divergence { cycle, detail } => {
                write!(f, "divergence at cycle {}: {}", cycle, detail)
            }
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Scenario(err) => Some(err),
            _ => None,
        }
    }
}

/// Summary of a passed differential check.
#[derive(Clone, Debug)]
pub struct CheckOutcome {
    /// Cycles replayed.
    pub cycles: usize,
    /// Read responses checked against the mirror.
    pub reads_checked: u64,
    /// Eviction outputs checked against the mirror.
    pub evictions_checked: u64,
    /// The cache's own counters for the run.
    pub stats: CacheStats,
}

/// Replays `scenario` and checks every output against the mirror.
///
/// # Errors
///
/// Fails on invalid scenarios, on scenarios without eviction outputs (the
/// mirror tracks displacement through them), or on any divergence between
/// the cache's outputs and the mirror's expectation.
pub fn check_scenario(scenario: &Scenario) -> Result<CheckOutcome, CheckError> {
    if !scenario.cache.evictions {
        return Err(CheckError::Unsupported(
            "the mirror requires eviction outputs to track displacement".into(),
        ));
    }

    let mut runner = Runner::new(scenario).map_err(CheckError::Scenario)?;
    let reports = runner.run();

    let mut mirror = MirrorModel::new(&scenario.cache);
    let mut reads_checked = 0u64;
    let mut evictions_checked = 0u64;

    for (stim, report) in scenario.cycles.iter().zip(&reports) {
        let cycle = report.cycle;
        let diverged = |detail: String| CheckError::Divergence { cycle, detail };

        // Displacements first: an install's eviction names the old entry.
        for evict in &report.outputs.evictions {
            if evict.en {
                mirror
                    .note_eviction(evict.addr, evict.data)
                    .map_err(diverged)?;
                evictions_checked += 1;
            }
        }

        let mut fills: Vec<_> = stim.fills.iter().collect();
        fills.sort_by_key(|f| f.port);
        for fill in fills {
            if fill.valid {
                mirror.note_fill(fill.addr, fill.data);
            }
        }

        for read in &stim.reads {
            let resp = report.outputs.reads[read.port];
            mirror.expect_read(read.addr, resp).map_err(diverged)?;
            reads_checked += 1;
            if scenario.cache.read_with_invalidate && read.invalidate && resp.valid {
                mirror.arm_clear(read.addr);
            }
        }

        mirror.end_cycle();
    }

    Ok(CheckOutcome {
        cycles: reports.len(),
        reads_checked,
        evictions_checked,
        stats: runner.stats().clone(),
    })
}

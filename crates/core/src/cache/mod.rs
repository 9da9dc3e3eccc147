//! Set-Associative Read Cache.
//!
//! This module implements a multi-ported, parameterized set-associative read
//! cache with explicit fills and optional eviction outputs. It models one
//! synchronous clock domain: all combinational outputs (hit/miss, read data,
//! eviction fields, policy victim ways) are produced in the cycle that
//! stimulates them, and all state updates (tag/valid/data writes, replacement
//! state, deferred invalidates) commit at the tick edge that ends the cycle.
//!
//! One [`Cache::cycle`] call executes one clock: the caller presents every
//! port's inputs, receives every port's outputs, and the tick commits before
//! the call returns.

/// Fill handler: miss resolution, write scheduling, eviction outputs.
mod fill;

/// Match engine producing hit vectors and miss flags.
pub mod lookup;

/// Replacement policy interface and implementations.
pub mod policies;

/// Port bundles and access records.
pub mod ports;

/// Read handler: hit outputs and read-with-invalidate deferral.
mod read;

/// Indexed storage arrays.
pub mod storage;

use crate::common::{AddrLayout, ConfigError, Flop};
use crate::config::{CacheParams, PolicyKind};
use crate::stats::CacheStats;

use self::lookup::match_ways;
use self::policies::{AvailableInvalidatedPolicy, PseudoLruPolicy, ReplacementPolicy};
use self::ports::{AccessMatrix, CycleOutputs, FillReq, ReadReq};
use self::storage::WayStore;

/// A deferred valid-bit clear captured by a read-with-invalidate hit.
type DeferredClear = Option<(usize, usize)>;

/// Multi-ported set-associative read cache.
///
/// Construction derives the tag/line split, allocates the per-way tag,
/// valid-bit, and data arrays, and instantiates one replacement policy per
/// line wired to the configured number of hit, alloc, and invalidate ports.
pub struct Cache {
    params: CacheParams,
    layout: AddrLayout,
    data_mask: u64,
    ways: Vec<WayStore>,
    policies: Vec<Box<dyn ReplacementPolicy>>,
    /// Per read port: the (line, way) whose valid bit clears next cycle.
    deferred: Vec<Flop<DeferredClear>>,
    /// Per-line, per-port records driven into the policies this cycle.
    hits: AccessMatrix,
    allocs: AccessMatrix,
    invalidates: AccessMatrix,
    /// Lines with records this cycle; bounds the per-cycle record sweep.
    touched: Vec<usize>,
    row_used: Vec<bool>,
    /// Event counters; survive [`Cache::reset`].
    pub stats: CacheStats,
}

impl Cache {
    /// Builds a cache from validated parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] the parameter record fails on.
    pub fn new(params: &CacheParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let layout = params.layout();
        let record_ports = params.fill_ports + params.read_ports;

        let policies = (0..params.lines)
            .map(|_| match params.policy {
                PolicyKind::PseudoLru => {
                    Box::new(PseudoLruPolicy::new(params.ways)) as Box<dyn ReplacementPolicy>
                }
                PolicyKind::AvailableInvalidated => Box::new(AvailableInvalidatedPolicy::new(
                    params.ways,
                    params.fill_ports,
                )),
            })
            .collect();

        Ok(Self {
            layout,
            data_mask: crate::common::width_mask(params.data_width),
            ways: (0..params.ways).map(|_| WayStore::new(params.lines)).collect(),
            policies,
            deferred: (0..params.read_ports).map(|_| Flop::new(None)).collect(),
            hits: AccessMatrix::new(params.lines, record_ports),
            allocs: AccessMatrix::new(params.lines, params.fill_ports),
            invalidates: AccessMatrix::new(params.lines, record_ports),
            touched: Vec::new(),
            row_used: vec![false; params.lines],
            stats: CacheStats::default(),
            params: params.clone(),
        })
    }

    /// The parameters the cache was built from.
    pub fn params(&self) -> &CacheParams {
        &self.params
    }

    /// The tag/line address decomposition in use.
    pub fn layout(&self) -> AddrLayout {
        self.layout
    }

    /// Executes one clock cycle.
    ///
    /// `fills` and `reads` carry one request per port; missing trailing
    /// entries are treated as idle ports. All outputs are combinational
    /// responses to this cycle's inputs; every state update they imply is
    /// committed before the call returns and becomes visible to the next
    /// cycle.
    pub fn cycle(&mut self, fills: &[FillReq], reads: &[ReadReq]) -> CycleOutputs {
        self.clear_records();
        self.drain_deferred_clears();

        let slots = self.fill_match_phase(fills);
        let grants = self.grant_phase(&slots);
        let evictions = self.fill_write_phase(&slots, &grants);
        let reads = self.read_phase(reads);

        self.commit();
        CycleOutputs { reads, evictions }
    }

    /// Combinational probe: does the cache currently hold `addr`?
    ///
    /// Reads the same registered state a read port would match against this
    /// cycle; no side effects.
    pub fn contains(&self, addr: u64) -> bool {
        let addr = self.layout.mask(addr);
        match_ways(&self.ways, self.layout.line_of(addr), self.layout.tag_of(addr)).hit()
    }

    /// The way the policy's issue latch presents for `(line, alloc port)`,
    /// when the configured policy carries one.
    pub fn issued_way(&self, line: usize, port: usize) -> Option<usize> {
        self.policies.get(line)?.issued_way(port)
    }

    /// Synchronous reset: all entries invalid, replacement state back to its
    /// deterministic initial value, deferred clears dropped. Statistics are
    /// preserved.
    pub fn reset(&mut self) {
        for way in &mut self.ways {
            way.reset();
        }
        for policy in &mut self.policies {
            policy.reset();
        }
        for flop in &mut self.deferred {
            flop.reset();
        }
        self.clear_records();
    }

    /// Marks `line` as carrying records this cycle.
    fn touch(&mut self, line: usize) {
        if !self.row_used[line] {
            self.row_used[line] = true;
            self.touched.push(line);
        }
    }

    /// Clears the previous cycle's records for every touched line.
    fn clear_records(&mut self) {
        for &line in &self.touched {
            self.hits.clear_row(line);
            self.allocs.clear_row(line);
            self.invalidates.clear_row(line);
            self.row_used[line] = false;
        }
        self.touched.clear();
    }

    /// Tick edge: fold records into each touched line's policy, commit all
    /// scheduled storage writes and deferred-clear captures.
    fn commit(&mut self) {
        for &line in &self.touched {
            self.policies[line].commit(
                self.allocs.row(line),
                self.hits.row(line),
                self.invalidates.row(line),
            );
        }
        for way in &mut self.ways {
            way.tick();
        }
        for flop in &mut self.deferred {
            flop.tick();
        }
        self.stats.cycles += 1;
    }
}

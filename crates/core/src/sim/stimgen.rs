//! Deterministic stimulus generation.
//!
//! Builds synthetic scenarios without a trace file: an address stream (fixed
//! stride or LFSR-scrambled) is expanded into a fill sweep followed by a read
//! sweep of the same addresses. Payloads are derived from the address, so a
//! checker can predict every read's data without carrying state.

use crate::config::CacheParams;

use super::trace::{FillStim, ReadStim, Scenario, TraceCycle};

/// A deterministic, replayable source of request addresses.
pub trait AddressStream {
    /// Produces the next address of the stream.
    fn next_addr(&mut self) -> u64;
}

/// Fixed-stride address stream over a wrapping window.
///
/// Yields `base`, `base + stride`, ... and wraps back to `base` once the
/// offset leaves `[0, span)`.
#[derive(Clone, Debug)]
pub struct StridedStream {
    base: u64,
    stride: u64,
    span: u64,
    offset: u64,
}

impl StridedStream {
    /// Creates a stream over `[base, base + span)` advancing by `stride`.
    ///
    /// A zero `span` is treated as one: the stream degenerates to repeating
    /// `base`.
    pub fn new(base: u64, stride: u64, span: u64) -> Self {
        Self {
            base,
            stride,
            span: span.max(1),
            offset: 0,
        }
    }
}

impl AddressStream for StridedStream {
    fn next_addr(&mut self) -> u64 {
        let addr = self.base + self.offset;
        self.offset = (self.offset + self.stride) % self.span;
        addr
    }
}

/// LFSR-scrambled address stream.
///
/// A xorshift register scatters accesses across `[base, base + span)`.
/// Deterministic for a given seed, so two clones replay identically.
#[derive(Clone, Debug)]
pub struct LfsrStream {
    state: u64,
    base: u64,
    span: u64,
}

impl LfsrStream {
    /// Creates a scrambled stream over `[base, base + span)`.
    ///
    /// A zero `seed` is replaced (the all-zero xorshift state is absorbing);
    /// a zero `span` is treated as one.
    pub fn new(seed: u64, base: u64, span: u64) -> Self {
        Self {
            state: if seed == 0 { 0x2545_F491_4F6C_DD1D } else { seed },
            base,
            span: span.max(1),
        }
    }
}

impl AddressStream for LfsrStream {
    fn next_addr(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        self.base + x % self.span
    }
}

/// The payload a generated fill carries for `addr`.
///
/// Address-derived so any consumer can recompute the expected data of a read
/// without tracking fills.
pub fn payload_for(addr: u64) -> u64 {
    addr ^ 0xA5A5_5A5A_A5A5_5A5A
}

/// One installing fill per cycle, `count` cycles, on fill port 0.
pub fn fill_sweep(mut stream: impl AddressStream, count: usize) -> Vec<TraceCycle> {
    (0..count)
        .map(|_| {
            let addr = stream.next_addr();
            TraceCycle {
                fills: vec![FillStim {
                    port: 0,
                    addr,
                    data: payload_for(addr),
                    valid: true,
                }],
                reads: Vec::new(),
            }
        })
        .collect()
}

/// One plain read per cycle, `count` cycles, on read port 0.
pub fn read_sweep(mut stream: impl AddressStream, count: usize) -> Vec<TraceCycle> {
    (0..count)
        .map(|_| TraceCycle {
            fills: Vec::new(),
            reads: vec![ReadStim {
                port: 0,
                addr: stream.next_addr(),
                invalidate: false,
            }],
        })
        .collect()
}

/// A full synthetic scenario: fill every address of the stream, then read
/// the same addresses back in the same order.
///
/// With the stream contained by the cache's capacity, the read sweep hits
/// throughout; past capacity, the fill sweep's own evictions surface as read
/// misses.
pub fn fill_then_read(
    params: &CacheParams,
    stream: impl AddressStream + Clone,
    count: usize,
) -> Scenario {
    let mut cycles = fill_sweep(stream.clone(), count);
    cycles.extend(read_sweep(stream, count));
    Scenario {
        cache: params.clone(),
        cycles,
    }
}

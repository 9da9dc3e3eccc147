//! Single-port cycle helpers.
//!
//! Most tests drive one fill port and one read port. These wrappers present
//! one request on port 0, run one clock cycle, and hand back the interesting
//! output, so a test reads as the operation sequence it exercises.

use cache_core::cache::ports::{CycleOutputs, EvictOut, FillReq, ReadReq, ReadResp};
use cache_core::{Cache, CacheParams, PolicyKind};

/// Parameter record for a `ways` x `lines` cache with the given policy,
/// 32-bit addresses/data, one fill and one read port, eviction outputs on,
/// read-with-invalidate on.
pub fn params(ways: usize, lines: usize, policy: PolicyKind) -> CacheParams {
    CacheParams {
        ways,
        lines,
        policy,
        read_with_invalidate: true,
        ..CacheParams::default()
    }
}

/// Builds a cache from [`params`], panicking on invalid geometry.
pub fn cache(ways: usize, lines: usize, policy: PolicyKind) -> Cache {
    Cache::new(&params(ways, lines, policy)).expect("valid test geometry")
}

/// One cycle with an installing fill of `(addr, data)` on fill port 0.
pub fn install(cache: &mut Cache, addr: u64, data: u64) -> CycleOutputs {
    cache.cycle(&[FillReq::install(addr, data)], &[])
}

/// One cycle with an installing fill, returning the paired eviction output.
pub fn install_evict(cache: &mut Cache, addr: u64, data: u64) -> EvictOut {
    install(cache, addr, data).evictions[0]
}

/// One cycle with an invalidating fill of `addr` on fill port 0.
pub fn invalidate(cache: &mut Cache, addr: u64) -> CycleOutputs {
    cache.cycle(&[FillReq::invalidate(addr)], &[])
}

/// One cycle with a plain read of `addr` on read port 0.
pub fn read(cache: &mut Cache, addr: u64) -> ReadResp {
    cache.cycle(&[], &[ReadReq::read(addr)]).reads[0]
}

/// One cycle with a read-with-invalidate of `addr` on read port 0.
pub fn read_invalidate(cache: &mut Cache, addr: u64) -> ReadResp {
    cache.cycle(&[], &[ReadReq::read_with_invalidate(addr)]).reads[0]
}

/// One idle cycle.
pub fn idle(cache: &mut Cache) -> CycleOutputs {
    cache.cycle(&[], &[])
}

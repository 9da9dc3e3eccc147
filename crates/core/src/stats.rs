//! Event counting and reporting.
//!
//! Tracks what the cache did over a run. It provides:
//! 1. **Cycle count:** Clock cycles executed.
//! 2. **Fill traffic:** Installs, refills, invalidating fills, evictions.
//! 3. **Read traffic:** Hits, misses, read-with-invalidates, and the derived
//!    hit rate.

/// Event counters for one cache instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Clock cycles executed.
    pub cycles: u64,
    /// Fill requests presented with `en` asserted.
    pub fills: u64,
    /// Allocating installs (fill misses that wrote a new entry).
    pub installs: u64,
    /// Refills (fill hits that refreshed an existing entry).
    pub refills: u64,
    /// Invalidating fills that cleared a valid entry.
    pub fill_invalidates: u64,
    /// Evictions of a valid victim reported on an eviction output.
    pub evictions: u64,
    /// Read requests presented with `en` asserted.
    pub reads: u64,
    /// Reads that hit.
    pub read_hits: u64,
    /// Reads that missed.
    pub read_misses: u64,
    /// Read-with-invalidate hits captured for deferred clearing.
    pub read_invalidates: u64,
}

impl CacheStats {
    /// Fraction of enabled reads that hit, or zero before any read.
    pub fn read_hit_rate(&self) -> f64 {
        if self.reads == 0 {
            0.0
        } else {
            self.read_hits as f64 / self.reads as f64
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("=== Cache Statistics ===");
        println!("  Cycles:            {}", self.cycles);
        println!("  Fills:             {}", self.fills);
        println!("    installs:        {}", self.installs);
        println!("    refills:         {}", self.refills);
        println!("    invalidates:     {}", self.fill_invalidates);
        println!("  Evictions:         {}", self.evictions);
        println!("  Reads:             {}", self.reads);
        println!("    hits:            {}", self.read_hits);
        println!("    misses:          {}", self.read_misses);
        println!("    with-invalidate: {}", self.read_invalidates);
        println!("  Read hit rate:     {:.2}%", self.read_hit_rate() * 100.0);
    }
}

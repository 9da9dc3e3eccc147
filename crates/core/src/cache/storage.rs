//! Indexed storage arrays.
//!
//! [`StorageArray`] models a register bank with combinational read ports and
//! next-tick write ports: reads always return the currently registered state,
//! writes issued during a cycle commit together at the clock edge. Any number
//! of ports may read or write in the same cycle; writes to the same entry are
//! applied in issue order, so the last writer wins deterministically.
//!
//! [`WayStore`] bundles the three per-way arrays (tag, valid bit, data) that
//! together hold one way's entries across every line.

/// Register bank indexed by line, with next-tick write commit.
#[derive(Clone, Debug)]
pub struct StorageArray<T: Copy> {
    entries: Vec<T>,
    writes: Vec<(usize, T)>,
    reset_value: T,
}

impl<T: Copy> StorageArray<T> {
    /// Creates an array of `num_entries` entries holding `reset_value`.
    pub fn new(num_entries: usize, reset_value: T) -> Self {
        Self {
            entries: vec![reset_value; num_entries],
            writes: Vec::new(),
            reset_value,
        }
    }

    /// Combinational read of the registered state at `idx`.
    #[inline(always)]
    pub fn read(&self, idx: usize) -> T {
        self.entries[idx]
    }

    /// Schedules a write at `idx`, committed at the next tick.
    ///
    /// Pending writes never disturb same-cycle reads.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, value: T) {
        self.writes.push((idx, value));
    }

    /// Commits all scheduled writes at the clock edge.
    pub fn tick(&mut self) {
        for (idx, value) in self.writes.drain(..) {
            self.entries[idx] = value;
        }
    }

    /// Synchronous reset: every entry back to the reset value, pending
    /// writes dropped.
    pub fn reset(&mut self) {
        self.writes.clear();
        for entry in &mut self.entries {
            *entry = self.reset_value;
        }
    }
}

/// The tag, valid-bit, and data arrays backing a single way.
#[derive(Clone, Debug)]
pub struct WayStore {
    /// Stored tags, one per line.
    pub tag: StorageArray<u64>,
    /// Valid bits, one per line.
    pub valid: StorageArray<bool>,
    /// Stored payloads, one per line.
    pub data: StorageArray<u64>,
}

impl WayStore {
    /// Creates the three arrays for a way spanning `lines` lines.
    pub fn new(lines: usize) -> Self {
        Self {
            tag: StorageArray::new(lines, 0),
            valid: StorageArray::new(lines, false),
            data: StorageArray::new(lines, 0),
        }
    }

    /// Commits all scheduled writes across the three arrays.
    pub fn tick(&mut self) {
        self.tag.tick();
        self.valid.tick();
        self.data.tick();
    }

    /// Synchronous reset of all three arrays.
    pub fn reset(&mut self) {
        self.tag.reset();
        self.valid.reset();
        self.data.reset();
    }
}

//! Storage Array Unit Tests.
//!
//! Verifies the combinational-read / next-tick-write discipline that every
//! hazard argument in the cache rests on.

use cache_core::cache::storage::{StorageArray, WayStore};

// ══════════════════════════════════════════════════════════
// 1. Read/write timing
// ══════════════════════════════════════════════════════════

/// A write is invisible to reads in its own cycle and visible after the tick.
#[test]
fn write_commits_at_tick() {
    let mut array = StorageArray::new(4, 0u64);
    array.write(2, 0xAB);
    assert_eq!(array.read(2), 0, "same-cycle read must see registered state");
    array.tick();
    assert_eq!(array.read(2), 0xAB);
}

/// Multiple writes to distinct entries commit together.
#[test]
fn concurrent_writes_to_distinct_entries() {
    let mut array = StorageArray::new(4, 0u64);
    array.write(0, 1);
    array.write(3, 2);
    array.tick();
    assert_eq!(array.read(0), 1);
    assert_eq!(array.read(3), 2);
}

/// Writes to the same entry in one cycle resolve to the last one issued.
#[test]
fn same_entry_last_write_wins() {
    let mut array = StorageArray::new(2, 0u64);
    array.write(1, 10);
    array.write(1, 20);
    array.tick();
    assert_eq!(array.read(1), 20);
}

/// A tick with no writes changes nothing.
#[test]
fn idle_tick_is_a_no_op() {
    let mut array = StorageArray::new(2, 7u64);
    array.tick();
    assert_eq!(array.read(0), 7);
    assert_eq!(array.read(1), 7);
}

// ══════════════════════════════════════════════════════════
// 2. Reset
// ══════════════════════════════════════════════════════════

/// Reset restores every entry and drops writes still in flight.
#[test]
fn reset_restores_entries_and_drops_pending_writes() {
    let mut array = StorageArray::new(2, 0u64);
    array.write(0, 5);
    array.tick();
    array.write(1, 6);
    array.reset();
    array.tick();
    assert_eq!(array.read(0), 0);
    assert_eq!(array.read(1), 0, "pending write must not survive reset");
}

// ══════════════════════════════════════════════════════════
// 3. Way bundles
// ══════════════════════════════════════════════════════════

/// A way's three arrays tick together.
#[test]
fn way_store_ticks_all_arrays() {
    let mut way = WayStore::new(4);
    way.tag.write(1, 0x3F);
    way.valid.write(1, true);
    way.data.write(1, 0xCAFE);
    assert!(!way.valid.read(1));
    way.tick();
    assert_eq!(way.tag.read(1), 0x3F);
    assert!(way.valid.read(1));
    assert_eq!(way.data.read(1), 0xCAFE);
}

/// A way's reset invalidates every line.
#[test]
fn way_store_reset() {
    let mut way = WayStore::new(2);
    way.valid.write(0, true);
    way.tick();
    way.reset();
    assert!(!way.valid.read(0));
}

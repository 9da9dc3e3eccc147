//! Match Engine Unit Tests.
//!
//! Verifies valid-gated tag comparison, the one-hot hit vector, the
//! priority-encoded hit way, and the miss flag.

use cache_core::cache::lookup::match_ways;
use cache_core::cache::storage::WayStore;

/// Builds `ways` way bundles spanning `lines` lines, with the given
/// `(way, line, tag)` entries installed and valid.
fn ways_with(ways: usize, lines: usize, entries: &[(usize, usize, u64)]) -> Vec<WayStore> {
    let mut stores: Vec<WayStore> = (0..ways).map(|_| WayStore::new(lines)).collect();
    for &(way, line, tag) in entries {
        stores[way].tag.write(line, tag);
        stores[way].valid.write(line, true);
        stores[way].tick();
    }
    stores
}

/// Miss is exactly "no valid way carries the tag".
#[test]
fn miss_is_complement_of_any_hit() {
    let stores = ways_with(4, 2, &[(1, 0, 0x10), (2, 1, 0x20)]);

    let m = match_ways(&stores, 0, 0x10);
    assert!(m.hit());
    assert_eq!(m.one_hot, 0b0010);
    assert_eq!(m.way, 1);

    let m = match_ways(&stores, 1, 0x10);
    assert!(m.miss, "tag present on another line must not match");

    let m = match_ways(&stores, 0, 0x99);
    assert!(m.miss);
    assert_eq!(m.one_hot, 0);
}

/// An invalid entry never matches, even with an equal tag.
#[test]
fn valid_bit_gates_the_compare() {
    let mut stores: Vec<WayStore> = (0..2).map(|_| WayStore::new(1)).collect();
    stores[0].tag.write(0, 0x42);
    stores[0].tick();

    let m = match_ways(&stores, 0, 0x42);
    assert!(m.miss, "tag match without valid must miss");
}

/// Duplicate tags across ways resolve to the lowest-indexed way.
#[test]
fn duplicate_tags_break_ties_to_lowest_way() {
    let stores = ways_with(4, 1, &[(1, 0, 0x7), (3, 0, 0x7)]);

    let m = match_ways(&stores, 0, 0x7);
    assert_eq!(m.one_hot, 0b1010);
    assert_eq!(m.way, 1, "priority encoder must pick the lowest match");
}

/// The reset state (nothing valid) misses everything.
#[test]
fn all_invalid_misses() {
    let stores: Vec<WayStore> = (0..4).map(|_| WayStore::new(4)).collect();
    for line in 0..4 {
        assert!(match_ways(&stores, line, 0).miss);
    }
}

//! Address Layout Unit Tests.
//!
//! Verifies the `[tag | line]` decomposition: bit budgeting, extraction,
//! reassembly, and width masking.

use cache_core::common::{width_mask, AddrLayout};

// ══════════════════════════════════════════════════════════
// 1. Bit budgeting
// ══════════════════════════════════════════════════════════

/// 64 lines consume 6 bits; a 32-bit address leaves 26 tag bits.
#[test]
fn line_and_tag_bits_partition_the_address() {
    let layout = AddrLayout::new(32, 64);
    assert_eq!(layout.line_bits(), 6);
    assert_eq!(layout.tag_bits(), 26);
}

/// A single line consumes zero bits: the whole address is tag.
#[test]
fn single_line_makes_tag_the_whole_address() {
    let layout = AddrLayout::new(32, 1);
    assert_eq!(layout.line_bits(), 0);
    assert_eq!(layout.tag_bits(), 32);
    assert_eq!(layout.line_of(0xDEAD_BEEF), 0);
    assert_eq!(layout.tag_of(0xDEAD_BEEF), 0xDEAD_BEEF);
}

// ══════════════════════════════════════════════════════════
// 2. Extraction and reassembly
// ══════════════════════════════════════════════════════════

/// The line field is the low bits, the tag the remaining high bits.
#[test]
fn split_extracts_low_line_and_high_tag() {
    let layout = AddrLayout::new(16, 8);
    // addr = tag 0x1ABC << 3 | line 5
    let addr = (0x1ABCu64 << 3) | 5;
    assert_eq!(layout.line_of(addr), 5);
    assert_eq!(layout.tag_of(addr), 0x1ABC);
}

/// `join` reassembles exactly what `line_of`/`tag_of` decomposed.
#[test]
fn join_round_trips_split() {
    let layout = AddrLayout::new(20, 32);
    for addr in [0u64, 1, 0x12345, 0xFFFFF] {
        let rebuilt = layout.join(layout.tag_of(addr), layout.line_of(addr));
        assert_eq!(rebuilt, addr, "round trip failed for {:#x}", addr);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Width masking
// ══════════════════════════════════════════════════════════

/// Bits above the address width are ignored everywhere.
#[test]
fn mask_discards_bits_above_addr_width() {
    let layout = AddrLayout::new(8, 4);
    assert_eq!(layout.mask(0x1FF), 0xFF);
    assert_eq!(layout.tag_of(0x1FF), 0xFF >> 2);
    assert_eq!(layout.line_of(0x1FD), 1);
}

/// The mask helper covers the degenerate and full-width cases.
#[test]
fn width_mask_handles_boundaries() {
    assert_eq!(width_mask(0), 0);
    assert_eq!(width_mask(1), 1);
    assert_eq!(width_mask(32), 0xFFFF_FFFF);
    assert_eq!(width_mask(64), u64::MAX);
}

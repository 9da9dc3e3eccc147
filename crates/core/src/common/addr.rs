//! Address decomposition.
//!
//! Every request address is split as `[tag | line]`: the low `line_bits` bits
//! select the line, the remaining high bits are the stored tag. The split is
//! fixed at cache construction and shared by every port, so it lives in one
//! place instead of being recomputed ad hoc by each handler.

/// Returns a mask covering the low `bits` bits of a 64-bit value.
#[inline(always)]
pub fn width_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Fixed tag/line decomposition for a cache geometry.
///
/// Constructed once from validated parameters; `lines` must be a power of two
/// so the line field is exactly `line_bits` wide and index decode is a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddrLayout {
    addr_width: u32,
    line_bits: u32,
    lines: usize,
}

impl AddrLayout {
    /// Creates a layout for `lines` lines addressed by `addr_width`-bit
    /// addresses. Parameters are assumed to have passed
    /// [`CacheParams::validate`](crate::config::CacheParams::validate).
    pub fn new(addr_width: u32, lines: usize) -> Self {
        Self {
            addr_width,
            line_bits: lines.trailing_zeros(),
            lines,
        }
    }

    /// Number of bits selecting the line.
    #[inline(always)]
    pub fn line_bits(&self) -> u32 {
        self.line_bits
    }

    /// Number of tag bits (`addr_width - line_bits`).
    #[inline(always)]
    pub fn tag_bits(&self) -> u32 {
        self.addr_width - self.line_bits
    }

    /// Number of lines in the geometry.
    #[inline(always)]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Masks a raw value down to the cache's address width.
    #[inline(always)]
    pub fn mask(&self, addr: u64) -> u64 {
        addr & width_mask(self.addr_width)
    }

    /// Extracts the line index from an address.
    #[inline(always)]
    pub fn line_of(&self, addr: u64) -> usize {
        (addr & width_mask(self.line_bits)) as usize
    }

    /// Extracts the tag from an address.
    #[inline(always)]
    pub fn tag_of(&self, addr: u64) -> u64 {
        self.mask(addr) >> self.line_bits
    }

    /// Reassembles an address from a stored tag and a line index.
    ///
    /// Used by the eviction path to report which address is being displaced.
    #[inline(always)]
    pub fn join(&self, tag: u64, line: usize) -> u64 {
        self.mask((tag << self.line_bits) | line as u64)
    }
}

//! Tree Pseudo-LRU Replacement Policy.
//!
//! Approximates Least Recently Used ordering with a binary tree of bits:
//! `ways - 1` bits per line instead of full recency ordering. Each internal
//! tree node holds one bit naming the half of its span the LRU entry lives
//! in; finding a victim walks the tree from the root, touching an entry
//! re-points every bit on its path at the opposite half.
//!
//! # Encoding
//!
//! The tree is a flat bit vector indexed breadth-first: node 0 is the root
//! and node `n`'s children are `2n + 1` (left) and `2n + 2` (right). The
//! polarity is fixed across the whole design: **a clear bit points left**
//! (the LRU is in the lower-index half), a set bit points right. The all-zero
//! reset state therefore walks to way 0 first.
//!
//! # Performance
//!
//! - **Time Complexity:** `grant` and each record folded by `commit` walk
//!   one root-to-leaf path, O(log W) for W ways.
//! - **Space Complexity:** W - 1 bits per line.

use super::{Access, AllocGrant, ReplacementPolicy};

/// Pseudo-LRU state for one line.
pub struct PseudoLruPolicy {
    /// Flat breadth-first tree of `ways - 1` bits.
    tree: u64,
    /// Associativity; a power of two.
    ways: usize,
}

impl PseudoLruPolicy {
    /// Creates the policy for one line of a `ways`-way cache.
    ///
    /// `ways` must be a power of two (enforced at cache construction).
    pub fn new(ways: usize) -> Self {
        Self { tree: 0, ways }
    }

    /// Walks from the root toward the side each bit names, returning the
    /// leaf's way index. No state mutation.
    fn walk(tree: u64, ways: usize) -> usize {
        let mut node = 0usize;
        while node < ways - 1 {
            let bit = (tree >> node) & 1;
            node = 2 * node + 1 + bit as usize;
        }
        node - (ways - 1)
    }

    /// Returns the tree with every bit on the path to `way` re-pointed.
    ///
    /// A hit points each bit at the *other* half (the touched side is now
    /// most recently used); an invalidate points each bit *at* the touched
    /// half (marking it LRU). Same polarity, opposite orientation.
    fn touched(tree: u64, ways: usize, way: usize, invalidate: bool) -> u64 {
        let mut next = tree;
        let mut node = 0usize;
        let mut lo = 0usize;
        let mut span = ways;
        while span > 1 {
            let half = span / 2;
            let went_right = way >= lo + half;
            let bit = if invalidate { went_right } else { !went_right };
            if bit {
                next |= 1 << node;
            } else {
                next &= !(1 << node);
            }
            if went_right {
                node = 2 * node + 2;
                lo += half;
            } else {
                node = 2 * node + 1;
            }
            span = half;
        }
        next
    }
}

impl ReplacementPolicy for PseudoLruPolicy {
    /// Chains victim selection across alloc ports.
    ///
    /// Port 0 walks the registered tree; each subsequent port walks the tree
    /// as if the previous port's way had just been touched. The chain lands
    /// in a different root subtree every step, so simultaneous allocs get
    /// distinct ways up to the associativity.
    fn grant(&self, allocs: &[Access], _invalidates: &[Access]) -> Vec<AllocGrant> {
        let mut tree = self.tree;
        let mut grants = Vec::with_capacity(allocs.len());
        for alloc in allocs {
            if alloc.access {
                let way = Self::walk(tree, self.ways);
                tree = Self::touched(tree, self.ways, way, false);
                grants.push(AllocGrant { way, free: false });
            } else {
                grants.push(AllocGrant {
                    way: 0,
                    free: false,
                });
            }
        }
        grants
    }

    /// Registers the cycle's accesses: the alloc chain first, then hits,
    /// then invalidates, each a path update in record order.
    fn commit(&mut self, allocs: &[Access], hits: &[Access], invalidates: &[Access]) {
        let mut tree = self.tree;
        for alloc in allocs {
            if alloc.access {
                tree = Self::touched(tree, self.ways, alloc.way, false);
            }
        }
        for hit in hits {
            if hit.access {
                tree = Self::touched(tree, self.ways, hit.way, false);
            }
        }
        for inv in invalidates {
            if inv.access {
                tree = Self::touched(tree, self.ways, inv.way, true);
            }
        }
        self.tree = tree;
    }

    /// All tree bits clear: the LRU path leads to way 0.
    fn reset(&mut self) {
        self.tree = 0;
    }
}

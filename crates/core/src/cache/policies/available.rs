//! Available-Invalidated Replacement Policy.
//!
//! Tracks which ways of its line are currently invalid (*available*) in a
//! shadow bit vector and greedily hands the lowest-indexed available way to
//! each allocating port. When every way is allocated it returns way 0 with
//! the grant's `free` flag clear, which the fill handler reads as a forced
//! eviction.
//!
//! The shadow is policy-local state: invalidates arriving this cycle are
//! already counted as available by this cycle's grants, so the shadow may
//! lead the storage's real valid bit by one cycle. Hits carry no recency
//! information for this policy and are ignored.

use crate::common::{priority_encode, width_mask, Flop};

use super::{Access, AllocGrant, ReplacementPolicy};

/// Available-Invalidated state for one line.
pub struct AvailableInvalidatedPolicy {
    /// Bit `w` set while way `w` is allocated.
    shadow: u64,
    /// Associativity.
    ways: usize,
    /// Per alloc port: the way issued when the port last fired, presented on
    /// the following cycle and held across idle cycles.
    issued: Vec<Flop<usize>>,
}

impl AvailableInvalidatedPolicy {
    /// Creates the policy for one line, with an issue latch per alloc port.
    pub fn new(ways: usize, alloc_ports: usize) -> Self {
        Self {
            shadow: 0,
            ways,
            issued: (0..alloc_ports).map(|_| Flop::new(0)).collect(),
        }
    }

    /// Ways available after folding in this cycle's invalidate claims.
    fn available(&self, invalidates: &[Access]) -> u64 {
        let mut freed = 0u64;
        for inv in invalidates {
            if inv.access {
                freed |= 1 << inv.way;
            }
        }
        (!self.shadow | freed) & width_mask(self.ways as u32)
    }
}

impl ReplacementPolicy for AvailableInvalidatedPolicy {
    /// Greedy lowest-index assignment in port order.
    ///
    /// Each asserted port claims the lowest way still available after this
    /// cycle's invalidates and the claims of every lower-indexed port. With
    /// nothing left, the grant is way 0 with `free` clear.
    fn grant(&self, allocs: &[Access], invalidates: &[Access]) -> Vec<AllocGrant> {
        let mut avail = self.available(invalidates);
        let mut grants = Vec::with_capacity(allocs.len());
        for alloc in allocs {
            if !alloc.access {
                grants.push(AllocGrant {
                    way: 0,
                    free: false,
                });
                continue;
            }
            if avail != 0 {
                let way = priority_encode(avail);
                avail &= !(1 << way);
                grants.push(AllocGrant { way, free: true });
            } else {
                grants.push(AllocGrant {
                    way: 0,
                    free: false,
                });
            }
        }
        grants
    }

    fn issued_way(&self, port: usize) -> Option<usize> {
        self.issued.get(port).map(Flop::get)
    }

    /// Next-state: `(shadow AND NOT invalidate_claim) OR alloc_claim`.
    ///
    /// An alloc and an invalidate landing on the same way in one cycle leave
    /// the way allocated. Hits are ignored. The issue latches capture the
    /// granted ways of asserted ports and hold otherwise.
    fn commit(&mut self, allocs: &[Access], _hits: &[Access], invalidates: &[Access]) {
        let mut invalidate_claim = 0u64;
        for inv in invalidates {
            if inv.access {
                invalidate_claim |= 1 << inv.way;
            }
        }
        let mut alloc_claim = 0u64;
        for (port, alloc) in allocs.iter().enumerate() {
            if alloc.access {
                alloc_claim |= 1 << alloc.way;
                if let Some(latch) = self.issued.get_mut(port) {
                    latch.set(alloc.way);
                }
            }
        }
        self.shadow = (self.shadow & !invalidate_claim) | alloc_claim;
        for latch in &mut self.issued {
            latch.tick();
        }
    }

    /// All ways available, issue latches back to way 0.
    fn reset(&mut self) {
        self.shadow = 0;
        for latch in &mut self.issued {
            latch.reset();
        }
    }
}

//! Fill handler.
//!
//! Per fill port, per cycle: resolve the request against the addressed
//! line's ways, drive the line's policy records, schedule the tag/valid/data
//! writes that commit at the tick, and produce the paired eviction output.
//!
//! Write enables default to deasserted and are raised only in the mutually
//! exclusive branches of the request classification, so two branches can
//! never write the same way from one port in one cycle.

use super::lookup::{match_ways, MatchResult};
use super::policies::AllocGrant;
use super::ports::{EvictOut, FillReq};
use super::Cache;

/// One fill port's resolved request, carried between the cycle's phases.
pub(crate) struct FillSlot {
    req: FillReq,
    line: usize,
    tag: u64,
    m: MatchResult,
}

impl Cache {
    /// Phase one: match each enabled fill port and drive policy records.
    ///
    /// Classification per port, in port-index order:
    /// - install hit (`valid` and a match): a hit record on the matched way;
    /// - install miss (`valid`, no match): an alloc record, way granted in
    ///   the next phase;
    /// - invalidate hit (`!valid` and a match): an invalidate record on the
    ///   matched way;
    /// - invalidate miss: no record, no write, no eviction. An
    ///   encoder-default way here would desynchronize the
    ///   Available-Invalidated shadow from the real valid bits.
    pub(crate) fn fill_match_phase(&mut self, fills: &[FillReq]) -> Vec<Option<FillSlot>> {
        let mut slots = Vec::with_capacity(self.params.fill_ports);
        for port in 0..self.params.fill_ports {
            let mut req = fills.get(port).copied().unwrap_or_default();
            if !req.en {
                slots.push(None);
                continue;
            }
            req.addr = self.layout.mask(req.addr);
            req.data &= self.data_mask;

            let line = self.layout.line_of(req.addr);
            let tag = self.layout.tag_of(req.addr);
            let m = match_ways(&self.ways, line, tag);

            self.stats.fills += 1;
            if req.valid && m.hit() {
                self.hits.set(line, port, m.way);
                self.touch(line);
            } else if req.valid {
                self.allocs.set(line, port, 0);
                self.touch(line);
            } else if m.hit() {
                self.invalidates.set(line, port, m.way);
                self.touch(line);
            }
            slots.push(Some(FillSlot { req, line, tag, m }));
        }
        slots
    }

    /// Phase two: one policy grant per line carrying alloc records.
    ///
    /// The policy sees the line's full alloc and invalidate rows at once and
    /// assigns victims in port-index order, so simultaneous allocs on one
    /// line receive distinct ways. Granted ways are written back into the
    /// alloc records for the commit fold.
    pub(crate) fn grant_phase(&mut self, slots: &[Option<FillSlot>]) -> Vec<AllocGrant> {
        let idle = AllocGrant {
            way: 0,
            free: false,
        };
        let mut port_grants = vec![idle; self.params.fill_ports];
        let mut granted_lines: Vec<usize> = Vec::new();

        for slot in slots.iter().flatten() {
            if !(slot.req.valid && slot.m.miss) || granted_lines.contains(&slot.line) {
                continue;
            }
            granted_lines.push(slot.line);

            let grants = self.policies[slot.line]
                .grant(self.allocs.row(slot.line), self.invalidates.row(slot.line));
            for (port, grant) in grants.iter().enumerate() {
                if self.allocs.row(slot.line)[port].access {
                    port_grants[port] = *grant;
                    self.allocs.set(slot.line, port, grant.way);
                }
            }
        }
        port_grants
    }

    /// Phase three: schedule storage writes and drive eviction outputs.
    ///
    /// The victim's tag, data, and valid bit are read combinationally this
    /// cycle; the install's own writes land at the tick. An install evicts
    /// when the chosen way holds a valid entry the policy did not know to be
    /// free: the Available-Invalidated shadow may lead the real valid bit by
    /// one cycle, and a way it freed this cycle is not a victim.
    pub(crate) fn fill_write_phase(
        &mut self,
        slots: &[Option<FillSlot>],
        grants: &[AllocGrant],
    ) -> Vec<EvictOut> {
        let mut evictions = vec![EvictOut::default(); self.params.fill_ports];

        for (port, slot) in slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            let line = slot.line;

            if slot.req.valid {
                let way = if slot.m.hit() {
                    self.stats.refills += 1;
                    slot.m.way
                } else {
                    let grant = grants[port];
                    let victim_valid = self.ways[grant.way].valid.read(line) && !grant.free;
                    if victim_valid && self.params.evictions {
                        evictions[port] = EvictOut {
                            en: true,
                            addr: self.layout.join(self.ways[grant.way].tag.read(line), line),
                            data: self.ways[grant.way].data.read(line),
                        };
                        self.stats.evictions += 1;
                    }
                    self.stats.installs += 1;
                    grant.way
                };
                self.ways[way].tag.write(line, slot.tag);
                self.ways[way].valid.write(line, true);
                self.ways[way].data.write(line, slot.req.data);
            } else if slot.m.hit() {
                let way = slot.m.way;
                if self.params.evictions {
                    evictions[port] = EvictOut {
                        en: true,
                        addr: slot.req.addr,
                        data: self.ways[way].data.read(line),
                    };
                }
                self.ways[way].valid.write(line, false);
                self.stats.fill_invalidates += 1;
            }
        }
        evictions
    }
}

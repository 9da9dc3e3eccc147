//! Read handler.
//!
//! Per read port, per cycle: match the request against the addressed line,
//! drive the hit data and valid outputs, record the hit for the line's
//! policy, and capture read-with-invalidate hits for the deferred valid-bit
//! clear.
//!
//! The clear is deliberately one cycle late: the hit was computed from the
//! valid bit this cycle, and the write lands through a flop so the storage
//! never sees a same-cycle read and write of that bit from one request. A
//! read of the same address in the cycle immediately after a
//! read-with-invalidate therefore still hits; from the cycle after that it
//! misses.

use super::lookup::match_ways;
use super::ports::{ReadReq, ReadResp};
use super::Cache;

impl Cache {
    /// Replays the previous cycle's read-with-invalidate captures: drive the
    /// policy invalidate record and schedule the valid-bit clear, both
    /// landing at this cycle's tick. Runs before any of this cycle's
    /// matching, so the policies see these invalidates when granting.
    pub(crate) fn drain_deferred_clears(&mut self) {
        for port in 0..self.deferred.len() {
            if let Some((line, way)) = self.deferred[port].get() {
                self.invalidates.set(line, self.params.fill_ports + port, way);
                self.touch(line);
                self.ways[way].valid.write(line, false);
                self.deferred[port].set(None);
            }
        }
    }

    /// Matches each enabled read port and drives its outputs.
    ///
    /// On a hit the response carries the matched way's data and a hit record
    /// reaches the line's policy. On a miss the response is all zeros and
    /// neither storage nor policy state changes. Read-with-invalidate hits are
    /// latched for [`Cache::drain_deferred_clears`] to replay next cycle.
    pub(crate) fn read_phase(&mut self, reads: &[ReadReq]) -> Vec<ReadResp> {
        let mut responses = vec![ReadResp::default(); self.params.read_ports];

        for port in 0..self.params.read_ports {
            let req = reads.get(port).copied().unwrap_or_default();
            if !req.en {
                continue;
            }
            let addr = self.layout.mask(req.addr);
            let line = self.layout.line_of(addr);
            let m = match_ways(&self.ways, line, self.layout.tag_of(addr));

            self.stats.reads += 1;
            if m.miss {
                self.stats.read_misses += 1;
                continue;
            }

            responses[port] = ReadResp {
                valid: true,
                data: self.ways[m.way].data.read(line),
            };
            self.hits.set(line, self.params.fill_ports + port, m.way);
            self.touch(line);
            self.stats.read_hits += 1;

            if self.params.read_with_invalidate && req.invalidate {
                self.deferred[port].set(Some((line, m.way)));
                self.stats.read_invalidates += 1;
            }
        }
        responses
    }
}

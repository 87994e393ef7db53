//! Request sequence tagging
//!
//! Every request a concern issues carries the next value of a monotonic counter.
//! Only the response to the latest issued request may change state; anything older
//! has been superseded and is dropped.

use serde::{Deserialize, Serialize};

/// Sequence number attached to a request and echoed back with its response
pub type RequestSeq = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTracker {
    latest: RequestSeq,
    in_flight: bool,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request, superseding any outstanding one
    pub fn begin(&mut self) -> RequestSeq {
        self.latest += 1;
        self.in_flight = true;
        self.latest
    }

    /// Settle the request tagged `seq`. Returns false for stale responses, which
    /// leave the tracker untouched.
    pub fn settle(&mut self, seq: RequestSeq) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.in_flight = false;
        true
    }

    pub fn is_current(&self, seq: RequestSeq) -> bool {
        self.in_flight && seq == self.latest
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn latest(&self) -> RequestSeq {
        self.latest
    }
}

// Clip switch controller
// Holds at most one pending immediate/scheduled switch plus an ordered queue
// of future switches, resolved against the callback time. The single slot and
// the queue are independent: either can change the active clip id.

use crate::sequencer::clip::ClipId;
use serde::{Deserialize, Serialize};

/// A clip change waiting for its activation time.
/// `timestamp` 0.0 means "as soon as possible" (next callback).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSwitch {
    pub id: ClipId,
    pub timestamp: f64,
}

#[derive(Debug, Default)]
pub struct ClipSwitchController {
    pending: Option<PendingSwitch>,
    queue: Vec<PendingSwitch>,
}

impl ClipSwitchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch on the next callback, replacing any pending switch
    pub fn set_immediate(&mut self, id: ClipId) {
        self.schedule(id, 0.0);
    }

    /// Switch once `timestamp` is reached, replacing any pending switch
    pub fn schedule(&mut self, id: ClipId, timestamp: f64) {
        self.pending = Some(PendingSwitch { id, timestamp });
    }

    /// Drop the pending immediate/scheduled switch, if any
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Insert into the queue, keeping it ascending by timestamp.
    /// The sort is stable, so entries with equal timestamps activate in
    /// insertion order.
    pub fn enqueue(&mut self, id: ClipId, timestamp: f64) {
        self.queue.push(PendingSwitch { id, timestamp });
        self.queue
            .sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    }

    /// Clear the whole queue; the pending slot is untouched
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Ordered copy of the queue for external inspection
    pub fn queue_snapshot(&self) -> Vec<PendingSwitch> {
        self.queue.clone()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolve every switch due at `now`, in activation order: the pending
    /// slot first, then queue entries while the head is due (back-to-back
    /// due entries all drain within one callback).
    pub fn resolve(&mut self, now: f64) -> Vec<ClipId> {
        let mut activated = Vec::new();

        if let Some(pending) = self.pending.take_if(|p| p.timestamp <= now) {
            activated.push(pending.id);
        }

        while self.queue.first().is_some_and(|head| head.timestamp <= now) {
            activated.push(self.queue.remove(0).id);
        }

        activated
    }
}

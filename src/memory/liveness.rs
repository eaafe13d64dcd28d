//! Liveness tracking for heap handles
//!
//! One flag per heap handle records whether the REF cell that last bound it is
//! still in scope. This is not a reference count: aliasing never raises a flag,
//! and the first owner to go out of scope clears it for every alias.
//!
//! [`LivenessTracker::recompute`] counts live flags and reports the count only
//! when it differs from the last reported value.

use super::cell::{Handle, Word};
use tracing::{trace, warn};

#[derive(Debug, Clone, Default)]
pub struct LivenessTracker {
    flags: Vec<bool>,
    reachable: usize,
}

impl LivenessTracker {
    pub fn new() -> Self {
        LivenessTracker {
            flags: Vec::new(),
            reachable: 0,
        }
    }

    /// Record a freshly allocated handle as live
    ///
    /// Handles arrive in allocation order, so the tracker grows in lockstep
    /// with the heap.
    pub fn track_live(&mut self, handle: Handle) {
        if handle == self.flags.len() {
            self.flags.push(true);
        } else if let Some(flag) = self.flags.get_mut(handle) {
            *flag = true;
        } else {
            self.flags.resize(handle, false);
            self.flags.push(true);
        }
    }

    /// Clear the flag for the raw value held by an out-of-scope REF cell
    pub fn mark_dead(&mut self, raw: Word) {
        let tracked = self.flags.len();
        let flag = Handle::try_from(raw)
            .ok()
            .and_then(|handle| self.flags.get_mut(handle));
        match flag {
            Some(flag) => *flag = false,
            None => warn!(raw, tracked, "ref value outside liveness table"),
        }
    }

    /// Recount live flags; returns the new count only if it changed
    pub fn recompute(&mut self) -> Option<usize> {
        let live = self.flags.iter().filter(|&&f| f).count();
        trace!(live, previous = self.reachable, "liveness recomputed");
        if live != self.reachable {
            self.reachable = live;
            Some(live)
        } else {
            None
        }
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        self.flags.get(handle).copied().unwrap_or(false)
    }

    /// Last reported reachable count
    pub fn reachable(&self) -> usize {
        self.reachable
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

use serde::{Deserialize, Serialize};

/// Count-only estimate of how many of a structure will exist soon.
///
/// `known_total` is the last trusted observation and `pending_total` the
/// number of accepted commands not yet confirmed by observation. Both are
/// unsigned so the estimate can never go negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTracker {
    known_total: u32,
    pending_total: u32,
}

impl BuildTracker {
    pub fn new() -> BuildTracker {
        BuildTracker::default()
    }

    pub fn known_total(&self) -> u32 {
        self.known_total
    }

    pub fn pending_total(&self) -> u32 {
        self.pending_total
    }

    pub fn estimated_total(&self) -> u32 {
        self.known_total + self.pending_total
    }

    /// Folds this tick's observation into the estimate.
    ///
    /// With nothing outstanding the observation is exact and replaces the
    /// estimate. Otherwise newly observed structures retire pending commands
    /// one for one; pending is never reduced by guessing.
    pub fn reconcile(&mut self, observed: u32, outstanding: u32) {
        if outstanding == 0 {
            self.known_total = observed;
            self.pending_total = 0;
        } else if self.pending_total > 0 {
            let created = observed.saturating_sub(self.known_total);

            if created > 0 {
                self.known_total += created;
                self.pending_total = self.pending_total.saturating_sub(created);
            }
        }
    }

    /// Records an accepted command.
    pub fn mark_pending(&mut self) {
        self.pending_total += 1;
    }
}

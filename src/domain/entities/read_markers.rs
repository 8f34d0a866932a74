use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of info posts an account has read, split into the subset the
/// server has confirmed and the locally-pending remainder. Read state is
/// monotonic: there is no per-day tombstone, only the explicit bulk clear.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadMarkers {
    pub confirmed: BTreeSet<u32>,
    pub pending: BTreeSet<u32>,
}

impl ReadMarkers {
    pub fn new(confirmed: BTreeSet<u32>, pending: BTreeSet<u32>) -> Self {
        Self { confirmed, pending }
    }

    pub fn is_read(&self, day: u32) -> bool {
        self.confirmed.contains(&day) || self.pending.contains(&day)
    }

    /// Local user action. Already-read days are not re-queued.
    pub fn mark_read(&mut self, day: u32) {
        if !self.confirmed.contains(&day) {
            self.pending.insert(day);
        }
    }

    /// Merge a sync pass result: the confirmed set becomes the union of the
    /// remote days and the pending days whose push succeeded; days that
    /// failed to push stay pending.
    pub fn absorb_sync(&mut self, remote_days: BTreeSet<u32>, pushed: &BTreeSet<u32>) {
        self.confirmed = &remote_days | pushed;
        self.pending = &self.pending - &self.confirmed;
    }
}

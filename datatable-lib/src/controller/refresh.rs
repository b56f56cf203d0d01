//! Refresh sequencing.
//!
//! Record refreshes are fetched outside the engine and may complete out of
//! order. Each fetch is tagged with a [`RefreshTicket`]; a result is applied
//! only if no newer result has been applied already (last write wins).

use std::collections::BTreeSet;

/// Identifies one record refresh. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What [`finish_refresh`](super::TableController::finish_refresh) did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The records replaced the working set.
    Applied,
    /// A newer result had already been applied; this one was dropped.
    Stale,
    /// The fetch failed; the previous records and selection were kept.
    Failed,
}

#[derive(Debug, Default)]
pub(crate) struct RefreshTracker {
    issued: u64,
    applied: u64,
    /// Tickets handed out and not yet settled.
    pending: BTreeSet<u64>,
    pub(crate) last_error: Option<String>,
}

impl RefreshTracker {
    pub(crate) fn begin(&mut self) -> RefreshTicket {
        self.issued += 1;
        self.pending.insert(self.issued);
        RefreshTicket(self.issued)
    }

    /// Marks a ticket as finished. Returns `false` if a newer result was
    /// already applied.
    pub(crate) fn settle(&mut self, ticket: RefreshTicket) -> bool {
        self.pending.remove(&ticket.0);
        ticket.0 > self.applied
    }

    pub(crate) fn mark_applied(&mut self, ticket: RefreshTicket) {
        self.applied = self.applied.max(ticket.0);
        self.last_error = None;
        self.forget_stale();
    }

    /// A directly supplied record set supersedes every ticket issued so far.
    pub(crate) fn supersede(&mut self) {
        self.applied = self.issued;
        self.last_error = None;
        self.forget_stale();
    }

    fn forget_stale(&mut self) {
        let applied = self.applied;
        self.pending.retain(|&ticket| ticket > applied);
    }

    /// `true` while some unsettled ticket could still be applied.
    pub(crate) fn is_loading(&self) -> bool {
        self.pending.last().is_some_and(|&ticket| ticket > self.applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_results() {
        let mut tracker = RefreshTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(first < second);
        assert!(tracker.is_loading());

        assert!(tracker.settle(second));
        tracker.mark_applied(second);
        assert!(!tracker.is_loading());

        assert!(!tracker.settle(first));
    }

    #[test]
    fn test_failure_does_not_block_older_success() {
        let mut tracker = RefreshTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(tracker.settle(second));
        tracker.last_error = Some("timeout".to_string());
        assert!(tracker.is_loading());
        assert!(tracker.settle(first));
        tracker.mark_applied(first);
        assert_eq!(tracker.last_error, None);
    }

    #[test]
    fn test_supersede_makes_outstanding_tickets_stale() {
        let mut tracker = RefreshTracker::default();
        let ticket = tracker.begin();
        tracker.supersede();
        assert!(!tracker.is_loading());
        assert!(!tracker.settle(ticket));
    }

    #[test]
    fn test_loading_until_every_live_ticket_settles() {
        let mut tracker = RefreshTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();
        let third = tracker.begin();

        assert!(tracker.settle(third));
        assert!(tracker.is_loading());
        assert!(tracker.settle(first));
        assert!(tracker.is_loading());
        assert!(tracker.settle(second));
        assert!(!tracker.is_loading());
    }
}

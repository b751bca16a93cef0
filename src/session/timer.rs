//! Per-circle expiry deadlines
//!
//! Single source of truth for which circle expires when. Taps and expiries
//! race for the same circle; whichever removes the deadline first wins, so
//! every consumer goes through `cancel` before acting.

/// Expiry deadline registry, one slot per live circle
#[derive(Debug, Default)]
pub struct CircleTimers {
    /// (circle id, absolute deadline ms); a handful of entries at most,
    /// linear scans beat any map here
    slots: Vec<(u64, u64)>,
}

impl CircleTimers {
    /// Arm the deadline for `id`, replacing any existing one
    pub fn schedule(&mut self, id: u64, deadline_ms: u64) {
        self.cancel(id);
        self.slots.push((id, deadline_ms));
    }

    /// Remove the deadline for `id`. Returns whether one was still pending;
    /// callers branch on this to settle the tap-vs-expiry race.
    pub fn cancel(&mut self, id: u64) -> bool {
        let before = self.slots.len();
        self.slots.retain(|&(slot_id, _)| slot_id != id);
        self.slots.len() != before
    }

    /// Drop every pending deadline
    pub fn cancel_all(&mut self) {
        self.slots.clear();
    }

    /// Earliest deadline due at `now_ms` as (deadline, id), ties broken by
    /// circle id
    pub fn peek_due(&self, now_ms: u64) -> Option<(u64, u64)> {
        self.slots
            .iter()
            .filter(|&&(_, deadline)| deadline <= now_ms)
            .map(|&(id, deadline)| (deadline, id))
            .min()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_reports_whether_a_deadline_was_pending() {
        let mut timers = CircleTimers::default();
        timers.schedule(1, 100);
        assert!(timers.cancel(1));
        assert!(!timers.cancel(1));
        assert!(!timers.cancel(99));
    }

    #[test]
    fn schedule_replaces_existing_deadline() {
        let mut timers = CircleTimers::default();
        timers.schedule(1, 100);
        timers.schedule(1, 300);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.peek_due(200), None);
        assert_eq!(timers.peek_due(300), Some((300, 1)));
    }

    #[test]
    fn peek_due_returns_earliest_then_lowest_id() {
        let mut timers = CircleTimers::default();
        timers.schedule(3, 500);
        timers.schedule(1, 200);
        timers.schedule(2, 200);
        assert_eq!(timers.peek_due(100), None);
        assert_eq!(timers.peek_due(250), Some((200, 1)));
        timers.cancel(1);
        assert_eq!(timers.peek_due(250), Some((200, 2)));
        timers.cancel(2);
        assert_eq!(timers.peek_due(1000), Some((500, 3)));
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut timers = CircleTimers::default();
        timers.schedule(1, 100);
        timers.schedule(2, 200);
        timers.cancel_all();
        assert!(timers.is_empty());
        assert_eq!(timers.peek_due(u64::MAX), None);
    }
}

use foundation::time::Millis;
use tracing::trace;

/// Default minimum spacing between recomputes.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Monotonic counter stamped on every notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// A recompute that is due now, carrying the parameters of the last event in
/// its burst.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeTicket<P> {
    pub generation: Generation,
    pub params: P,
}

#[derive(Debug, Clone)]
struct Pending<P> {
    generation: Generation,
    params: P,
    due: Millis,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub notifications: u64,
    pub superseded: u64,
    pub started: u64,
}

/// Trailing-edge coalescing of viewport-change notifications.
///
/// Ordering contract:
/// - A notification replaces any pending one; the replaced parameters are
///   dropped, never queued.
/// - A ticket is released only once `interval_ms` has elapsed since the last
///   notification of its burst, so starts are at least `interval_ms` apart.
/// - At most one ticket is in flight. Notifications that arrive while a ticket
///   is in flight become a single follow-up released after [`finish`].
///
/// Time is supplied by the caller so the scheduler stays deterministic.
///
/// [`finish`]: RecomputeScheduler::finish
#[derive(Debug)]
pub struct RecomputeScheduler<P> {
    interval_ms: u64,
    generation: u64,
    pending: Option<Pending<P>>,
    in_flight: Option<Generation>,
    stats: SchedulerStats,
}

impl<P> RecomputeScheduler<P> {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            generation: 0,
            pending: None,
            in_flight: None,
            stats: SchedulerStats::default(),
        }
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Latest generation handed out by [`notify`](Self::notify).
    pub fn current_generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Earliest time at which [`poll`](Self::poll) can release a ticket.
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Records a viewport-change notification.
    pub fn notify(&mut self, now: Millis, params: P) -> Generation {
        self.generation = self.generation.wrapping_add(1);
        let generation = Generation(self.generation);
        self.stats.notifications += 1;

        let due = now.after(self.interval_ms);

        if let Some(prev) = self.pending.replace(Pending {
            generation,
            params,
            due,
        }) {
            self.stats.superseded += 1;
            trace!(
                superseded = prev.generation.0,
                by = generation.0,
                "recompute request superseded"
            );
        }
        generation
    }

    /// Releases the pending recompute if it is due and nothing is in flight.
    pub fn poll(&mut self, now: Millis) -> Option<RecomputeTicket<P>> {
        if self.in_flight.is_some() {
            return None;
        }
        if self.pending.as_ref()?.due > now {
            return None;
        }

        let pending = self.pending.take()?;
        self.in_flight = Some(pending.generation);
        self.stats.started += 1;
        Some(RecomputeTicket {
            generation: pending.generation,
            params: pending.params,
        })
    }

    /// Marks the in-flight ticket complete.
    ///
    /// Returns `true` if a follow-up recompute is pending.
    pub fn finish(&mut self, generation: Generation) -> bool {
        match self.in_flight {
            Some(current) if current == generation => self.in_flight = None,
            other => {
                trace!(
                    finished = generation.0,
                    in_flight = ?other.map(|g| g.0),
                    "finish for a ticket that is not in flight"
                );
            }
        }
        self.pending.is_some()
    }

    /// Drops any pending notification without running it.
    pub fn clear_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Generation, RecomputeScheduler};
    use foundation::time::Millis;

    #[test]
    fn burst_collapses_to_last_event() {
        let mut sched = RecomputeScheduler::new(150);
        sched.notify(Millis(0), "a");
        sched.notify(Millis(40), "b");
        sched.notify(Millis(90), "c");

        assert!(sched.poll(Millis(200)).is_none());
        let ticket = sched.poll(Millis(240)).expect("due");
        assert_eq!(ticket.params, "c");
        assert_eq!(ticket.generation, Generation(3));
        assert_eq!(sched.stats().superseded, 2);

        assert!(!sched.finish(ticket.generation));
        assert!(sched.poll(Millis(10_000)).is_none());
    }

    #[test]
    fn notification_during_flight_runs_after_finish() {
        let mut sched = RecomputeScheduler::new(150);
        sched.notify(Millis(0), 1);
        let first = sched.poll(Millis(150)).expect("due");

        sched.notify(Millis(160), 2);
        assert!(sched.current_generation() > first.generation);
        // Not reentrant: nothing is released while the first is in flight.
        assert!(sched.poll(Millis(1_000)).is_none());

        assert!(sched.finish(first.generation));
        let second = sched.poll(Millis(1_000)).expect("follow-up");
        assert_eq!(second.params, 2);
        assert_eq!(second.generation, sched.current_generation());
    }

    #[test]
    fn trailing_edge_spaces_consecutive_starts() {
        let mut sched = RecomputeScheduler::new(150);
        sched.notify(Millis(0), ());
        let t = sched.poll(Millis(150)).expect("due");
        sched.finish(t.generation);

        sched.notify(Millis(160), ());
        assert_eq!(sched.next_due(), Some(Millis(310)));
        assert!(sched.poll(Millis(309)).is_none());
        assert!(sched.poll(Millis(310)).is_some());
    }

    #[test]
    fn stale_finish_is_ignored() {
        let mut sched = RecomputeScheduler::new(10);
        sched.notify(Millis(0), ());
        let t = sched.poll(Millis(10)).expect("due");
        sched.notify(Millis(20), ());
        assert!(sched.finish(Generation(99)));
        assert!(sched.poll(Millis(100)).is_none());
        assert!(sched.finish(t.generation));
        assert!(sched.poll(Millis(100)).is_some());
    }
}

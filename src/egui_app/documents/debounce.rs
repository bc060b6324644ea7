//! Search debouncing and stale-response guarding.
//!
//! [`Debouncer`] holds at most one scheduled value. Scheduling again before
//! the quiet period elapses replaces it and restarts the clock, so a burst of
//! keystrokes yields exactly one release. Time is passed in by the caller,
//! which keeps the logic independent of the frame loop.
//!
//! [`FetchSequence`] hands out [`FetchTicket`]s. Issuing a ticket invalidates
//! every earlier one; a response that comes back with a stale ticket must be
//! dropped, even if it arrives after the newer one.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Schedule `value` for release once `quiet` has passed with no further
    /// calls. Replaces anything already scheduled.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Release the scheduled value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, due)) if now >= due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Time left before the scheduled value is due
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, due)| due.saturating_duration_since(now))
    }
}

/// Identity of one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct FetchSequence {
    latest: u64,
}

impl FetchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, invalidating every earlier one
    pub fn issue(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    /// Invalidate every outstanding ticket without issuing a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }
}

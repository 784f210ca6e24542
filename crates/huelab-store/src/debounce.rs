#![forbid(unsafe_code)]

//! Trailing-debounce timer as an explicit value, not a closure.
//!
//! Holds at most one pending payload with its deadline. Scheduling replaces
//! any earlier pending entry (latest wins), cancellation is an idempotent
//! no-op when nothing is pending, and firing requires the owner to pass the
//! current time — there are no background threads or real timers, which
//! keeps the debounce logic testable without simulating an event loop.

use std::time::Instant;

/// A single-slot trailing-debounce timer.
///
/// `T` is the payload delivered when the deadline passes; the color store
/// uses the pending color itself.
#[derive(Debug)]
pub struct DebounceTimer<T> {
    pending: Option<Pending<T>>,
}

impl<T> Default for DebounceTimer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Pending<T> {
    payload: T,
    deadline: Instant,
}

impl<T> DebounceTimer<T> {
    /// Create an empty timer.
    #[must_use]
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `payload` to fire at `deadline`, replacing any pending
    /// entry. Only the latest scheduled payload can ever fire.
    pub fn schedule(&mut self, payload: T, deadline: Instant) {
        self.pending = Some(Pending { payload, deadline });
    }

    /// Drop any pending entry. Idempotent: cancelling an empty or
    /// already-fired timer does nothing.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Fire the pending entry if its deadline has been reached.
    ///
    /// Returns the payload when `now` is at or past the deadline, leaving
    /// the timer empty. Returns `None` (and keeps the entry) otherwise.
    pub fn fire_due(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.pending.take().map(|p| p.payload)
        } else {
            None
        }
    }

    /// Remove and return the pending payload without waiting out its
    /// deadline. Used to flush a pending commit synchronously.
    pub fn take_pending(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Whether a payload is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending entry, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

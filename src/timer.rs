//! Cancellable deadline helpers driven from event-loop ticks.
//!
//! All waits in this app are deferred checks against `Instant` deadlines —
//! there are no background threads and no busy loops. Timers fire during the
//! tick that first observes the deadline as passed, which bounds lateness by
//! the poll interval.

use std::time::{Duration, Instant};

/// Debounce timer: every `reset` installs a fresh deadline and discards the
/// previous one. Only the most recently installed deadline can ever fire.
#[derive(Debug, Default)]
pub struct IdleTimer {
    deadline: Option<Instant>,
}

impl IdleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, now: Instant, idle: Duration) {
        self.deadline = Some(now + idle);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed; the timer clears
    /// itself on fire.
    pub fn fired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A delayed one-shot action guarded by a generation token.
///
/// `schedule` returns the token for the installed deadline; `fired` only
/// reports true for that same token. Cancelling or re-scheduling bumps the
/// generation, so a stale deadline from a previous cycle can never apply its
/// effect — this closes the window where a fast show/hide toggle races a
/// pending cleanup.
#[derive(Debug, Default)]
pub struct DelayedAction {
    deadline: Option<Instant>,
    generation: u64,
}

impl DelayedAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) -> u64 {
        self.generation += 1;
        self.deadline = Some(now + delay);
        self.generation
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline for `token` has passed. A token
    /// from a superseded schedule never fires.
    pub fn fired(&mut self, now: Instant, token: u64) -> bool {
        if token != self.generation {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#![forbid(unsafe_code)]

//! Single-slot debouncer.
//!
//! [`Debouncer`] holds at most one pending payload together with the time
//! left before it fires. Scheduling always cancels and replaces whatever was
//! pending; nothing is ever queued behind it.
//!
//! Time only moves when the owner calls [`Debouncer::advance`] from its
//! update turn, so a fired payload is always handed back on that same
//! context and never runs concurrently with the owner's other logic.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use wheelpick_core::debounce::Debouncer;
//!
//! let mut debouncer = Debouncer::new();
//! debouncer.schedule(Duration::from_millis(300), "first");
//! debouncer.schedule(Duration::from_millis(300), "second");
//!
//! assert_eq!(debouncer.advance(Duration::from_millis(299)), None);
//! assert_eq!(debouncer.advance(Duration::from_millis(1)), Some("second"));
//! assert!(!debouncer.is_pending());
//! ```
//!
//! # External timers
//!
//! A wall-clock timer running elsewhere can capture [`Debouncer::generation`]
//! when it is armed and later call [`Debouncer::fire_if_current`] once it has
//! been marshaled back onto the update context. A reschedule or cancel in the
//! meantime bumps the generation and turns the late fire into a no-op.

use std::time::Duration;

#[derive(Debug)]
struct Pending<T> {
    remaining: Duration,
    payload: T,
}

/// Delayed single-shot payload with supersede-on-reschedule semantics.
#[derive(Debug)]
pub struct Debouncer<T> {
    pending: Option<Pending<T>>,
    generation: u64,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debouncer<T> {
    /// Create an idle debouncer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }

    /// Arm the debouncer, replacing any pending payload.
    ///
    /// Returns the generation of the new arming.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(Pending {
            remaining: delay,
            payload,
        });
        self.generation
    }

    /// Disarm without firing. Safe to call when nothing is pending.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Whether a payload is waiting to fire.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending payload fires.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.remaining)
    }

    /// Generation of the current arming; bumps on every schedule and cancel.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Move time forward by `dt`. Returns the payload if it fired.
    pub fn advance(&mut self, dt: Duration) -> Option<T> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(dt);
        if !pending.remaining.is_zero() {
            return None;
        }
        self.take_fired()
    }

    /// Fire now if `generation` still names the pending arming.
    ///
    /// Returns `None` for a stale generation or when nothing is pending.
    pub fn fire_if_current(&mut self, generation: u64) -> Option<T> {
        if generation != self.generation {
            return None;
        }
        self.take_fired()
    }

    fn take_fired(&mut self) -> Option<T> {
        let fired = self.pending.take()?;
        self.generation = self.generation.wrapping_add(1);
        Some(fired.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const MS100: Duration = Duration::from_millis(100);
    const MS500: Duration = Duration::from_millis(500);

    #[test]
    fn new_debouncer_is_idle() {
        let mut d: Debouncer<u8> = Debouncer::new();
        assert!(!d.is_pending());
        assert_eq!(d.remaining(), None);
        assert_eq!(d.advance(MS500), None);
    }

    #[test]
    fn fires_once_after_delay() {
        let mut d = Debouncer::new();
        d.schedule(MS500, 7);
        assert_eq!(d.advance(Duration::from_millis(499)), None);
        assert_eq!(d.remaining(), Some(Duration::from_millis(1)));
        assert_eq!(d.advance(MS100), Some(7));
        assert_eq!(d.advance(MS500), None);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut d = Debouncer::new();
        d.schedule(Duration::ZERO, ());
        assert_eq!(d.advance(Duration::ZERO), Some(()));
    }

    #[test]
    fn reschedule_supersedes_and_restarts_delay() {
        let mut d = Debouncer::new();
        d.schedule(MS500, "old");
        assert_eq!(d.advance(Duration::from_millis(400)), None);
        d.schedule(MS500, "new");
        assert_eq!(d.advance(Duration::from_millis(400)), None);
        assert_eq!(d.advance(MS100), Some("new"));
        assert!(!d.is_pending());
    }

    #[test]
    fn only_latest_closure_executes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut d: Debouncer<Box<dyn FnOnce()>> = Debouncer::new();
        for label in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            d.schedule(MS100, Box::new(move || log.borrow_mut().push(label)));
        }
        if let Some(callback) = d.advance(MS100) {
            callback();
        }
        assert_eq!(*log.borrow(), vec!["c"]);
    }

    #[test]
    fn cancel_when_idle_is_harmless() {
        let mut d: Debouncer<()> = Debouncer::new();
        let generation = d.generation();
        d.cancel();
        assert_eq!(d.generation(), generation);
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_disarms_pending() {
        let mut d = Debouncer::new();
        d.schedule(MS100, 1);
        d.cancel();
        assert_eq!(d.advance(MS500), None);
    }

    #[test]
    fn stale_generation_does_not_fire() {
        let mut d = Debouncer::new();
        let first = d.schedule(MS500, "first");
        let second = d.schedule(MS500, "second");
        assert_ne!(first, second);
        assert_eq!(d.fire_if_current(first), None);
        assert!(d.is_pending());
        assert_eq!(d.fire_if_current(second), Some("second"));
        assert_eq!(d.fire_if_current(second), None);
    }

    #[test]
    fn cancel_invalidates_outstanding_generation() {
        let mut d = Debouncer::new();
        let generation = d.schedule(MS500, ());
        d.cancel();
        d.schedule(MS500, ());
        assert_eq!(d.fire_if_current(generation), None);
    }
}

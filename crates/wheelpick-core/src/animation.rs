#![forbid(unsafe_code)]

//! Minimal time-driven animation primitives.
//!
//! An [`Animation`] is advanced explicitly with [`Animation::tick`]; it never
//! reads a clock. [`Tween`] interpolates a scalar between two values over a
//! fixed duration and is what the selector crossfade is built on.
//!
//! # Invariants
//!
//! 1. `value()` equals `from` before the first tick and `to` once complete.
//! 2. A zero-duration tween is complete on construction.
//! 3. `tick()` after completion is a no-op.

use std::time::Duration;

/// Maps linear progress in `[0.0, 1.0]` to eased progress.
pub type EasingFn = fn(f64) -> f64;

/// Identity easing.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-out (decelerating).
#[must_use]
pub fn ease_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Something that advances with explicit time steps.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Scalar interpolation from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Linear tween between two values.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: linear,
        }
    }

    /// Replace the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start value.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.from
    }

    /// End value.
    #[must_use]
    pub fn end_value(&self) -> f64 {
        self.to
    }

    /// Total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let eased = (self.easing)(self.progress());
        self.from + (self.to - self.from) * eased
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

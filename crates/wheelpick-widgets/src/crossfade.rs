#![forbid(unsafe_code)]

//! Active ↔ inactive crossfade between the scrolling surface and the
//! collapsed placeholder.
//!
//! Opacity moves toward `1.0` while active and `0.0` while inactive. The
//! fade duration scales with the distance still to cover, so reversing a
//! half-finished fade takes half the time instead of restarting.
//!
//! The placeholder is shown the moment the selector goes inactive, but only
//! hidden once a fade toward active has fully completed. At no point during
//! a transition are both surfaces hidden.
//!
//! # Invariants
//!
//! - Opacity is always in `[0.0, 1.0]`.
//! - `placeholder_visible == false` implies the last completed fade was
//!   toward active.
//!
//! # Failure Modes
//!
//! - A zero fade unit completes every transition within the call that
//!   started it.

use std::time::Duration;

use wheelpick_core::animation::{Animation, Tween};

use crate::host::FadeSurface;

/// Default time for a full `0.0 → 1.0` fade.
pub const DEFAULT_FADE_UNIT: Duration = Duration::from_millis(200);

/// Opacity and placeholder state for one selector.
#[derive(Debug, Clone)]
pub struct CrossfadeController {
    tween: Option<Tween>,
    opacity: f64,
    target_active: bool,
    placeholder_visible: bool,
    unit: Duration,
}

impl Default for CrossfadeController {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_UNIT)
    }
}

impl CrossfadeController {
    /// Start at rest in the inactive state.
    #[must_use]
    pub fn new(unit: Duration) -> Self {
        Self {
            tween: None,
            opacity: 0.0,
            target_active: false,
            placeholder_visible: true,
            unit,
        }
    }

    /// Change the duration of a full fade. Applies to the next transition.
    pub fn set_unit(&mut self, unit: Duration) {
        self.unit = unit;
    }

    #[must_use]
    pub fn unit(&self) -> Duration {
        self.unit
    }

    /// Time needed to go from the current opacity to `target`.
    #[must_use]
    pub fn fade_duration(&self, target: f64) -> Duration {
        self.unit.mul_f64((target - self.opacity).abs().min(1.0))
    }

    /// Begin fading toward the given activation state.
    ///
    /// Returns `false` when already heading there.
    pub fn set_active<S: FadeSurface + ?Sized>(&mut self, active: bool, surface: &mut S) -> bool {
        if active == self.target_active {
            return false;
        }
        self.target_active = active;
        if !active {
            self.placeholder_visible = true;
            surface.set_placeholder_visible(true);
        }
        let target = Self::opacity_for(active);
        let duration = self.fade_duration(target);
        self.tween = Some(Tween::new(self.opacity, target, duration));
        if duration.is_zero() {
            self.finish(surface);
        }
        true
    }

    /// Snap to the resting state for `active` without animating or touching
    /// any surface. Used before a host is attached.
    pub fn jump_to(&mut self, active: bool) {
        self.tween = None;
        self.target_active = active;
        self.opacity = Self::opacity_for(active);
        self.placeholder_visible = !active;
    }

    /// Push the current state to `surface` as-is.
    pub fn apply_resting<S: FadeSurface + ?Sized>(&self, surface: &mut S) {
        surface.set_opacity(self.opacity);
        surface.set_placeholder_visible(self.placeholder_visible);
    }

    /// Advance a running fade. Returns `true` while still animating.
    pub fn tick<S: FadeSurface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        tween.tick(dt);
        if tween.is_complete() {
            self.finish(surface);
            return false;
        }
        self.opacity = tween.value().clamp(0.0, 1.0);
        surface.set_opacity(self.opacity);
        true
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Activation state the controller is at or heading toward.
    #[must_use]
    pub fn target_active(&self) -> bool {
        self.target_active
    }

    #[must_use]
    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    fn finish<S: FadeSurface + ?Sized>(&mut self, surface: &mut S) {
        self.tween = None;
        self.opacity = Self::opacity_for(self.target_active);
        surface.set_opacity(self.opacity);
        if self.target_active {
            self.placeholder_visible = false;
            surface.set_placeholder_visible(false);
        }
    }

    const fn opacity_for(active: bool) -> f64 {
        if active { 1.0 } else { 0.0 }
    }
}

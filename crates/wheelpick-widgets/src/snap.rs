#![forbid(unsafe_code)]

//! Scroll/snap state machine.
//!
//! Tracks whether the viewport is at rest, being moved by the user, or
//! being moved by our own snap command, and decides which scroll command to
//! issue when the selection needs the viewport to converge on an item.
//!
//! ```text
//!              offset changing                 settle / converge
//!   AtRest ───────────────────► UserScrolling ───────────────────► Snapping
//!     ▲                                                               │
//!     └──────────── settle or fail-safe (target reached) ─────────────┘
//! ```
//!
//! A settle notification may never arrive (the host can coalesce or drop
//! it), so every issued command arms a fail-safe debounce. Offset changes
//! produced while snapping keep pushing the fail-safe back; once they stop
//! and the delay elapses, the snap is finished as if it had settled.
//!
//! # Invariants
//!
//! 1. Hit-testing is disabled exactly while the phase is `Snapping`.
//! 2. At most one fail-safe is pending.
//! 3. Two consecutive commands with the same `(target, origin)` pair use
//!    [`ScrollMode::Direct`] for the second; anything else uses
//!    [`ScrollMode::Smooth`] and becomes the remembered pair.
//!
//! # Failure Modes
//!
//! - A fail-safe firing outside `Snapping` is ignored.
//! - "Already at rest" uses exact comparison after half-to-even rounding;
//!   float drift can make it miss and issue one redundant snap.

use std::time::Duration;

use wheelpick_core::debounce::Debouncer;
use wheelpick_core::geometry::is_settled_at;

use crate::host::{ScrollMode, ScrollViewport};

/// Default fail-safe delay after issuing a snap.
pub const DEFAULT_FAIL_SAFE_DELAY: Duration = Duration::from_millis(500);

// ============================================================================
// Phase
// ============================================================================

/// Where the viewport's motion is coming from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapPhase {
    /// Not moving.
    #[default]
    AtRest,
    /// Moved by the user (drag or inertia).
    UserScrolling,
    /// Moved by a snap command we issued.
    Snapping,
}

/// How the state machine took an offset-changing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureUpdate {
    /// User motion: the caller drops its highlight.
    Scrolling,
    /// Motion from our own snap; the fail-safe was pushed back.
    SnapInProgress,
}

/// Outcome of [`SnapStateMachine::converge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapDecision {
    /// The viewport already rests on the target.
    AlreadyAtRest,
    /// A snap is running; it will re-validate when it finishes.
    InFlight,
    /// A new scroll command went out.
    Issued { target: f64, mode: ScrollMode },
}

// ============================================================================
// Command planning
// ============================================================================

/// The last issued scroll command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSnap {
    pub target: f64,
    pub origin: f64,
}

/// Chooses between a direct jump and a smooth scroll.
///
/// Hosts may coalesce a smooth scroll whose parameters repeat the previous
/// one into nothing, leaving the viewport stuck. A repeat therefore goes out
/// as a direct jump, which is always applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollCommandPlanner {
    last: Option<PendingSnap>,
}

impl ScrollCommandPlanner {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Pick the mode for a command from `origin` to `target`.
    pub fn plan(&mut self, target: f64, origin: f64) -> ScrollMode {
        let pair = PendingSnap { target, origin };
        if self.last == Some(pair) {
            return ScrollMode::Direct;
        }
        self.last = Some(pair);
        ScrollMode::Smooth
    }

    #[must_use]
    pub fn last(&self) -> Option<PendingSnap> {
        self.last
    }
}

// ============================================================================
// State machine
// ============================================================================

/// Fail-safe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapCheck;

/// Snap bookkeeping for one selector.
#[derive(Debug)]
pub struct SnapStateMachine {
    phase: SnapPhase,
    latest_offset: f64,
    planner: ScrollCommandPlanner,
    fail_safe: Debouncer<SnapCheck>,
    fail_safe_delay: Duration,
}

impl Default for SnapStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_FAIL_SAFE_DELAY)
    }
}

impl SnapStateMachine {
    #[must_use]
    pub fn new(fail_safe_delay: Duration) -> Self {
        Self {
            phase: SnapPhase::AtRest,
            latest_offset: 0.0,
            planner: ScrollCommandPlanner::new(),
            fail_safe: Debouncer::new(),
            fail_safe_delay,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SnapPhase {
        self.phase
    }

    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.phase == SnapPhase::Snapping
    }

    /// Most recent offset reported by the host or reached by a direct jump.
    #[must_use]
    pub fn latest_offset(&self) -> f64 {
        self.latest_offset
    }

    #[must_use]
    pub fn fail_safe_delay(&self) -> Duration {
        self.fail_safe_delay
    }

    /// Applies from the next arming on.
    pub fn set_fail_safe_delay(&mut self, delay: Duration) {
        self.fail_safe_delay = delay;
    }

    #[must_use]
    pub fn fail_safe_pending(&self) -> bool {
        self.fail_safe.is_pending()
    }

    #[must_use]
    pub fn last_command(&self) -> Option<PendingSnap> {
        self.planner.last()
    }

    /// Adopt the viewport's offset without any transition, e.g. on attach.
    pub fn sync_offset(&mut self, offset: f64) {
        self.latest_offset = offset;
    }

    /// Intermediate offset notification.
    pub fn on_offset_changing(&mut self, offset: f64) -> GestureUpdate {
        self.latest_offset = offset;
        if self.phase == SnapPhase::Snapping {
            self.fail_safe.schedule(self.fail_safe_delay, SnapCheck);
            return GestureUpdate::SnapInProgress;
        }
        self.phase = SnapPhase::UserScrolling;
        self.fail_safe.cancel();
        GestureUpdate::Scrolling
    }

    /// Final settle notification. Returns `true` if it ended our own snap.
    ///
    /// The caller re-validates the selection against `offset` afterwards;
    /// that may issue a fresh snap.
    pub fn on_settled<V: ScrollViewport + ?Sized>(&mut self, offset: f64, viewport: &mut V) -> bool {
        self.latest_offset = offset;
        if self.phase != SnapPhase::Snapping {
            self.phase = SnapPhase::AtRest;
            return false;
        }
        self.finish(viewport);
        true
    }

    /// Bring the viewport to `target` unless it already rests there.
    pub fn converge<V: ScrollViewport + ?Sized>(
        &mut self,
        target: f64,
        viewport: &mut V,
    ) -> SnapDecision {
        let origin = self.latest_offset;
        if is_settled_at(target, origin) {
            self.finish(viewport);
            return SnapDecision::AlreadyAtRest;
        }
        if self.phase == SnapPhase::Snapping {
            tracing::trace!(message = "selector.snap", action = "in_flight", target, origin);
            return SnapDecision::InFlight;
        }

        self.phase = SnapPhase::Snapping;
        viewport.set_hit_testable(false);
        let mode = self.planner.plan(target, origin);
        tracing::debug!(
            message = "selector.snap",
            action = "issue",
            target,
            origin,
            mode = ?mode
        );
        viewport.set_scroll_offset(target, mode);
        if mode == ScrollMode::Direct {
            self.latest_offset = target;
        }
        self.fail_safe.schedule(self.fail_safe_delay, SnapCheck);
        SnapDecision::Issued { target, mode }
    }

    /// Move the fail-safe clock. Returns `true` when it fired.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.fail_safe.advance(dt).is_some()
    }

    /// Handle a fired fail-safe. Returns `true` if a snap was still running
    /// and has now been finished; the caller then re-validates.
    pub fn on_fail_safe<V: ScrollViewport + ?Sized>(&mut self, viewport: &mut V) -> bool {
        if self.phase != SnapPhase::Snapping {
            tracing::trace!(message = "selector.fail_safe", action = "ignored", phase = ?self.phase);
            return false;
        }
        tracing::debug!(
            message = "selector.fail_safe",
            action = "finish",
            offset = self.latest_offset
        );
        self.finish(viewport);
        true
    }

    pub fn cancel_fail_safe(&mut self) {
        self.fail_safe.cancel();
    }

    fn finish<V: ScrollViewport + ?Sized>(&mut self, viewport: &mut V) {
        if self.phase == SnapPhase::Snapping {
            viewport.set_hit_testable(true);
        }
        self.phase = SnapPhase::AtRest;
    }
}

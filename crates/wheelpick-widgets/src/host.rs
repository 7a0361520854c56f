#![forbid(unsafe_code)]

//! Host-facing seams.
//!
//! The selector never draws or lays anything out. It reads geometry from a
//! [`ScrollViewport`] and issues commands to it and to a [`FadeSurface`].
//! Host notifications flow the other way, as method calls on
//! [`WheelSelector`](crate::selector::WheelSelector).

use wheelpick_core::geometry::Insets;

/// How a scroll command should be applied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Jump straight to the target. Always applied, even when repeated.
    Direct,
    /// Animate to the target. Hosts may coalesce a repeat with identical
    /// parameters into nothing.
    Smooth,
}

/// The scrollable surface hosting the item stack.
pub trait ScrollViewport {
    /// Measured height of the scrollable content, stack margins included.
    fn measured_extent(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f64;

    /// Move the viewport toward `target`.
    fn set_scroll_offset(&mut self, target: f64, mode: ScrollMode);

    /// Enable or disable pointer hit-testing on the viewport.
    fn set_hit_testable(&mut self, enabled: bool);

    /// Apply the centering margin around the item stack.
    fn set_content_margin(&mut self, margin: Insets);
}

/// The opacity/placeholder pair used for the active ↔ inactive crossfade.
pub trait FadeSurface {
    /// Opacity of the scrolling surface, in `[0.0, 1.0]`.
    fn set_opacity(&mut self, value: f64);

    /// Visibility of the collapsed placeholder.
    fn set_placeholder_visible(&mut self, visible: bool);
}

/// Everything a selector needs from its host.
pub trait SelectorHost: ScrollViewport + FadeSurface {}

impl<T: ScrollViewport + FadeSurface> SelectorHost for T {}

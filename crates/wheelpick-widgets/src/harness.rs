#![forbid(unsafe_code)]

//! In-memory host for headless use and tests.
//!
//! [`RecordingHost`] implements both host traits without any real surface.
//! It remembers every command it receives so callers can assert on the exact
//! sequence, and it models the scroll position the way a real viewport
//! would: a `Direct` command lands immediately, a `Smooth` command leaves
//! the position untouched until the caller reports where the animation
//! ended (see [`RecordingHost::finish_smooth_scroll`]).

use wheelpick_core::geometry::Insets;

use crate::host::{FadeSurface, ScrollMode, ScrollViewport};

/// One scroll command as received from the selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub target: f64,
    pub mode: ScrollMode,
}

/// Recording fake for [`SelectorHost`](crate::host::SelectorHost).
#[derive(Debug, Clone)]
pub struct RecordingHost {
    viewport_height: f64,
    content_height: f64,
    offset: f64,
    margin: Insets,
    hit_testable: bool,
    opacity: f64,
    placeholder_visible: bool,
    scroll_commands: Vec<ScrollCommand>,
    opacity_log: Vec<f64>,
    in_flight: Option<f64>,
}

impl RecordingHost {
    /// A viewport of `viewport_height` over an item stack `content_height`
    /// tall (item margins included, centering margin excluded).
    #[must_use]
    pub fn new(viewport_height: f64, content_height: f64) -> Self {
        Self {
            viewport_height,
            content_height,
            offset: 0.0,
            margin: Insets::default(),
            hit_testable: true,
            opacity: 1.0,
            placeholder_visible: false,
            scroll_commands: Vec::new(),
            opacity_log: Vec::new(),
            in_flight: None,
        }
    }

    /// Move the viewport as if the user dragged it.
    pub fn drag_to(&mut self, offset: f64) {
        self.in_flight = None;
        self.offset = offset;
    }

    /// Complete the outstanding smooth scroll, if any. Returns the offset the
    /// viewport came to rest at.
    pub fn finish_smooth_scroll(&mut self) -> Option<f64> {
        let target = self.in_flight.take()?;
        self.offset = target;
        Some(target)
    }

    /// Target of the smooth scroll still animating, if any.
    #[must_use]
    pub fn smooth_scroll_in_flight(&self) -> Option<f64> {
        self.in_flight
    }

    /// Change the viewport and content size, as a relayout would.
    pub fn resize(&mut self, viewport_height: f64, content_height: f64) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
    }

    #[must_use]
    pub fn scroll_commands(&self) -> &[ScrollCommand] {
        &self.scroll_commands
    }

    /// Forget recorded commands and opacity values.
    pub fn clear_log(&mut self) {
        self.scroll_commands.clear();
        self.opacity_log.clear();
    }

    #[must_use]
    pub fn content_margin(&self) -> Insets {
        self.margin
    }

    #[must_use]
    pub fn is_hit_testable(&self) -> bool {
        self.hit_testable
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Every opacity value set, oldest first.
    #[must_use]
    pub fn opacity_log(&self) -> &[f64] {
        &self.opacity_log
    }

    #[must_use]
    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }
}

impl ScrollViewport for RecordingHost {
    fn measured_extent(&self) -> f64 {
        self.margin.top + self.content_height + self.margin.bottom
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, target: f64, mode: ScrollMode) {
        self.scroll_commands.push(ScrollCommand { target, mode });
        match mode {
            ScrollMode::Direct => {
                self.in_flight = None;
                self.offset = target;
            }
            ScrollMode::Smooth => self.in_flight = Some(target),
        }
    }

    fn set_hit_testable(&mut self, enabled: bool) {
        self.hit_testable = enabled;
    }

    fn set_content_margin(&mut self, margin: Insets) {
        self.margin = margin;
    }
}

impl FadeSurface for RecordingHost {
    fn set_opacity(&mut self, value: f64) {
        self.opacity = value;
        self.opacity_log.push(value);
    }

    fn set_placeholder_visible(&mut self, visible: bool) {
        self.placeholder_visible = visible;
    }
}

#![forbid(unsafe_code)]

//! A simulated scroll surface with eased smooth scrolls.
//!
//! The viewport only moves when [`SimViewport::advance`] is called. Every
//! frame of movement produces an intermediate offset notification; the end
//! of a scroll produces a settled one, unless settle notifications are being
//! dropped to exercise the selector's fail-safe.

use std::time::Duration;

use wheelpick_core::animation::{Animation, Tween, ease_out};
use wheelpick_core::geometry::Insets;
use wheelpick_widgets::host::{FadeSurface, ScrollMode, ScrollViewport};

/// One notification the viewport owes its selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetNotice {
    pub offset: f64,
    pub settled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollOrigin {
    User,
    Program,
}

#[derive(Debug)]
struct ActiveScroll {
    tween: Tween,
    origin: ScrollOrigin,
}

#[derive(Debug)]
pub struct SimViewport {
    name: &'static str,
    viewport_height: f64,
    content_height: f64,
    margin: Insets,
    offset: f64,
    scroll: Option<ActiveScroll>,
    scroll_duration: Duration,
    drop_program_settles: bool,
    hit_testable: bool,
    opacity: f64,
    placeholder_visible: bool,
    notices: Vec<OffsetNotice>,
}

impl SimViewport {
    pub fn new(name: &'static str, viewport_height: f64, content_height: f64) -> Self {
        Self {
            name,
            viewport_height,
            content_height,
            margin: Insets::default(),
            offset: 0.0,
            scroll: None,
            scroll_duration: Duration::from_millis(250),
            drop_program_settles: false,
            hit_testable: true,
            opacity: 1.0,
            placeholder_visible: false,
            notices: Vec::new(),
        }
    }

    /// Swallow the settled notification of selector-issued smooth scrolls.
    #[must_use]
    pub fn dropping_settles(mut self, drop: bool) -> Self {
        self.drop_program_settles = drop;
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    #[must_use]
    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    #[must_use]
    pub fn is_hit_testable(&self) -> bool {
        self.hit_testable
    }

    /// Start a user fling toward `target`. Ignored while hit-testing is off.
    pub fn fling_to(&mut self, target: f64) -> bool {
        if !self.hit_testable {
            return false;
        }
        self.start_scroll(target, ScrollOrigin::User);
        true
    }

    /// Move time forward and collect the notifications it produced.
    pub fn advance(&mut self, dt: Duration) -> Vec<OffsetNotice> {
        let Some(scroll) = self.scroll.as_mut() else {
            return std::mem::take(&mut self.notices);
        };
        scroll.tween.tick(dt);
        self.offset = scroll.tween.value();
        let done = scroll.tween.is_complete();
        let origin = scroll.origin;
        if done {
            self.scroll = None;
            let report = origin == ScrollOrigin::User || !self.drop_program_settles;
            if report {
                self.notices.push(OffsetNotice {
                    offset: self.offset,
                    settled: true,
                });
            } else {
                tracing::warn!(
                    message = "demo.viewport",
                    action = "drop_settle",
                    viewport = self.name,
                    offset = self.offset
                );
            }
        } else {
            self.notices.push(OffsetNotice {
                offset: self.offset,
                settled: false,
            });
        }
        std::mem::take(&mut self.notices)
    }

    fn max_offset(&self) -> f64 {
        (self.measured_extent() - self.viewport_height).max(0.0)
    }

    fn start_scroll(&mut self, target: f64, origin: ScrollOrigin) {
        let target = target.clamp(0.0, self.max_offset());
        let tween = Tween::new(self.offset, target, self.scroll_duration).easing(ease_out);
        self.scroll = Some(ActiveScroll { tween, origin });
    }
}

impl ScrollViewport for SimViewport {
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
        match mode {
            ScrollMode::Direct => {
                self.scroll = None;
                self.offset = target.clamp(0.0, self.max_offset());
                self.notices.push(OffsetNotice {
                    offset: self.offset,
                    settled: true,
                });
            }
            ScrollMode::Smooth => self.start_scroll(target, ScrollOrigin::Program),
        }
    }

    fn set_hit_testable(&mut self, enabled: bool) {
        self.hit_testable = enabled;
    }

    fn set_content_margin(&mut self, margin: Insets) {
        self.margin = margin;
    }
}

impl FadeSurface for SimViewport {
    fn set_opacity(&mut self, value: f64) {
        self.opacity = value;
    }

    fn set_placeholder_visible(&mut self, visible: bool) {
        self.placeholder_visible = visible;
    }
}

#![forbid(unsafe_code)]

//! The composed wheel selector.
//!
//! [`WheelSelector`] wires a [`SelectionEngine`], a [`SnapStateMachine`],
//! and a [`CrossfadeController`] to one host and to a shared
//! [`ActivationCoordinator`]. It is the only type a host talks to.
//!
//! # Update model
//!
//! Everything happens on one update context. Host notifications
//! ([`on_offset_changing`](WheelSelector::on_offset_changing),
//! [`on_tap`](WheelSelector::on_tap), [`on_resize`](WheelSelector::on_resize))
//! and [`tick`](WheelSelector::tick) must all be called from it.
//!
//! A select request never takes effect in the call that makes it. It is
//! applied by the next `tick`, which gives the host one turn to finish any
//! layout or animation pass already in progress. A newer request made
//! before that tick replaces the older one.
//!
//! # Invariants
//!
//! 1. Without an attached host every operation only records state; nothing
//!    is applied and no command is issued.
//! 2. Intermediate offset notifications never change the selection. Only a
//!    settle notification or the snap fail-safe can.
//! 3. Re-selecting the selected item while the viewport rests on it issues
//!    no scroll command.
//!
//! # Failure Modes
//!
//! - A settle notification that never arrives is covered by the fail-safe:
//!   the snap is finished and the selection re-validated against the last
//!   reported offset.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use wheelpick_core::geometry::{Insets, WheelGeometry};

use crate::activation::{ActivationCell, ActivationCoordinator, SelectorId};
use crate::config::SelectorConfig;
use crate::crossfade::CrossfadeController;
use crate::error::ConfigError;
use crate::host::{ScrollMode, ScrollViewport, SelectorHost};
use crate::item::{Item, ItemLayout};
use crate::selection::SelectionEngine;
use crate::snap::{GestureUpdate, SnapDecision, SnapPhase, SnapStateMachine};

/// Something the host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectorEvent {
    /// A select request was applied. `changed` is `false` when it
    /// republished the current selection.
    Selected { index: usize, changed: bool },
    /// The selector became active or inactive.
    ActivationChanged { active: bool },
    /// A scroll command went to the host.
    SnapIssued { target: f64, mode: ScrollMode },
}

/// What a tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// No host, or a snap is running.
    Ignored,
    /// The selector was inactive and is now active.
    Activated,
    /// The selected item was tapped; the selector is now inactive.
    Deactivated,
    /// The tap missed every item.
    Rejected,
    /// A select request for this index is pending.
    Selecting(usize),
}

/// Wheel list selector over content `C`, hosted by `H`.
#[derive(Debug)]
pub struct WheelSelector<C, H> {
    id: SelectorId,
    config: SelectorConfig,
    host: Option<H>,
    engine: SelectionEngine<C>,
    snap: SnapStateMachine,
    crossfade: CrossfadeController,
    activation: Rc<ActivationCell>,
    coordinator: Rc<ActivationCoordinator>,
    content_margin: Insets,
    events: VecDeque<SelectorEvent>,
}

impl<C, H: SelectorHost> WheelSelector<C, H> {
    /// Create a detached, inactive selector with no items.
    ///
    /// A configured `selected_index` is requested right away and applied
    /// once items and a host are present.
    pub fn new(
        config: SelectorConfig,
        coordinator: Rc<ActivationCoordinator>,
    ) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let id = SelectorId::next();
        let mut engine = SelectionEngine::new(config.item_layout());
        if let Some(index) = config.selected_index {
            engine.request_select(to_raw_index(index));
        }
        Ok(Self {
            id,
            snap: SnapStateMachine::new(config.fail_safe_duration()),
            crossfade: CrossfadeController::new(config.fade_unit_duration()),
            config,
            host: None,
            engine,
            activation: Rc::new(ActivationCell::new(id)),
            coordinator,
            content_margin: Insets::default(),
            events: VecDeque::new(),
        })
    }

    // ------------------------------------------------------------------
    // Host lifecycle
    // ------------------------------------------------------------------

    /// Attach a host, returning the previous one.
    ///
    /// Pushes the centering margin and the resting crossfade state, then
    /// requests the current selection so the viewport converges on it.
    pub fn attach(&mut self, mut host: H) -> Option<H> {
        self.content_margin = self.centering_insets(&host);
        host.set_content_margin(self.content_margin);
        host.set_hit_testable(!self.snap.is_snapping());
        self.snap.sync_offset(host.scroll_offset());
        self.crossfade.jump_to(self.activation.is_active());
        self.crossfade.apply_resting(&mut host);
        tracing::debug!(
            message = "selector.attach",
            selector = self.id.get(),
            viewport_height = host.viewport_height(),
            items = self.engine.len()
        );
        let previous = self.host.replace(host);
        self.request_current_selection();
        previous
    }

    /// Detach the host. Pending requests stay queued until the next attach.
    pub fn detach(&mut self) -> Option<H> {
        self.snap.cancel_fail_safe();
        self.host.take()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    #[must_use]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Replace every item with `source`.
    pub fn set_items<I>(&mut self, source: I)
    where
        I: IntoIterator<Item = C>,
    {
        self.engine.rebuild_items(source, self.config.item_layout());
        self.request_current_selection();
    }

    /// Request `index`; applied on the next tick.
    pub fn set_selected_index(&mut self, index: usize) {
        self.config.selected_index = Some(index);
        self.engine.request_select(to_raw_index(index));
    }

    /// Resize every item and recompute the centering margin.
    pub fn set_item_layout(&mut self, layout: ItemLayout) {
        self.config.item_height = layout.height;
        self.config.item_width = layout.width;
        self.config.item_margin = layout.margin;
        self.engine.relayout(layout);
        self.refresh_margin();
        self.request_current_selection();
    }

    pub fn set_fail_safe_delay(&mut self, delay: Duration) {
        self.config.fail_safe_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.snap.set_fail_safe_delay(delay);
    }

    pub fn set_fade_unit(&mut self, unit: Duration) {
        self.config.fade_unit_ms = u64::try_from(unit.as_millis()).unwrap_or(u64::MAX);
        self.crossfade.set_unit(unit);
    }

    /// Apply a whole new configuration, calling the setter for each part
    /// that differs from the current one.
    pub fn update_config(&mut self, config: SelectorConfig) -> Result<(), ConfigError> {
        let config = config.validated()?;
        let old = self.config.clone();
        if config.item_layout() != old.item_layout() {
            self.set_item_layout(config.item_layout());
        }
        if config.fail_safe_delay_ms != old.fail_safe_delay_ms {
            self.set_fail_safe_delay(config.fail_safe_duration());
        }
        if config.fade_unit_ms != old.fade_unit_ms {
            self.set_fade_unit(config.fade_unit_duration());
        }
        if config.selected_index != old.selected_index
            && let Some(index) = config.selected_index
        {
            self.set_selected_index(index);
        }
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Host notifications
    // ------------------------------------------------------------------

    /// The viewport was resized.
    pub fn on_resize(&mut self) {
        if self.host.is_none() {
            return;
        }
        self.refresh_margin();
        if self.snap.phase() == SnapPhase::AtRest {
            self.request_current_selection();
        }
    }

    /// The viewport offset is changing (`settled == false`) or has come to
    /// rest (`settled == true`).
    pub fn on_offset_changing(&mut self, offset: f64, settled: bool) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        if !settled {
            if self.snap.on_offset_changing(offset) == GestureUpdate::Scrolling {
                self.engine.clear_highlight();
            }
            return;
        }
        self.snap.on_settled(offset, host);
        let geometry = wheel_geometry(
            &*host,
            self.content_margin,
            self.engine.layout().height,
            self.engine.len(),
        );
        let index = geometry.index_for_offset(offset);
        tracing::debug!(
            message = "selector.settle",
            selector = self.id.get(),
            offset,
            index
        );
        self.engine.request_select(index);
    }

    /// A tap at `y`, relative to the top of the item stack.
    pub fn on_tap(&mut self, y: f64) -> TapOutcome {
        if self.host.is_none() {
            return TapOutcome::Ignored;
        }
        if self.snap.is_snapping() {
            tracing::trace!(message = "selector.tap", action = "ignored", y);
            return TapOutcome::Ignored;
        }
        if !self.is_active() {
            self.activate();
            return TapOutcome::Activated;
        }

        let Some(geometry) = self.geometry() else {
            return TapOutcome::Ignored;
        };
        let Some(index) = self.engine.index_for_tap_position(y, &geometry) else {
            tracing::trace!(message = "selector.tap", action = "rejected", y);
            return TapOutcome::Rejected;
        };
        if Some(index) == self.engine.selected() {
            self.deactivate();
            return TapOutcome::Deactivated;
        }
        tracing::debug!(message = "selector.tap", action = "select", y, index);
        self.snap.cancel_fail_safe();
        self.engine.request_select(to_raw_index(index));
        TapOutcome::Selecting(index)
    }

    // ------------------------------------------------------------------
    // Activation
    // ------------------------------------------------------------------

    /// Become the active selector among this coordinator's siblings.
    pub fn activate(&mut self) {
        let cell = Rc::clone(&self.activation);
        self.coordinator.activate(&cell);
        self.sync_activation();
    }

    pub fn deactivate(&mut self) {
        self.coordinator.deactivate(self.id);
        self.sync_activation();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    #[must_use]
    pub fn id(&self) -> SelectorId {
        self.id
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Run one update turn, `dt` after the previous one.
    ///
    /// Advances the snap fail-safe, applies the pending select request, and
    /// advances the crossfade.
    ///
    /// `dt` elapsed before this turn, so it only counts against a fail-safe
    /// armed earlier; a snap issued here starts its fail-safe from zero.
    pub fn tick(&mut self, dt: Duration) {
        self.sync_activation();
        self.with_host(|this, host| {
            let pending = this.engine.take_pending();
            if this.snap.advance(dt) && this.snap.on_fail_safe(host) && pending.is_none() {
                let geometry = this.geometry_for(host);
                this.engine
                    .request_select(geometry.index_for_offset(this.snap.latest_offset()));
            }
            if let Some(raw) = pending {
                this.apply_select(raw, host);
            }
            this.crossfade.tick(dt, host);
        });
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = SelectorEvent> + '_ {
        self.events.drain(..)
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.engine.selected()
    }

    #[must_use]
    pub fn highlighted_index(&self) -> Option<usize> {
        self.engine.highlighted()
    }

    #[must_use]
    pub fn items(&self) -> &[Item<C>] {
        self.engine.items()
    }

    #[must_use]
    pub fn has_pending_select(&self) -> bool {
        self.engine.has_pending()
    }

    #[must_use]
    pub fn phase(&self) -> SnapPhase {
        self.snap.phase()
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.crossfade.opacity()
    }

    #[must_use]
    pub fn is_placeholder_visible(&self) -> bool {
        self.crossfade.is_placeholder_visible()
    }

    /// Content shown by the collapsed placeholder: the highlighted item, or
    /// the selected one while nothing is highlighted.
    #[must_use]
    pub fn placeholder_content(&self) -> Option<&C> {
        self.engine
            .highlighted_item()
            .or_else(|| self.engine.selected_item())
            .map(Item::content)
    }

    /// Current offset ↔ index snapshot, if a host is attached.
    #[must_use]
    pub fn geometry(&self) -> Option<WheelGeometry> {
        self.host.as_ref().map(|host| self.geometry_for(host))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn apply_select(&mut self, raw: i64, host: &mut H) {
        let Some(index) = self.engine.resolve(raw) else {
            tracing::trace!(message = "selector.select", action = "empty", raw);
            return;
        };
        self.engine.highlight(Some(index));
        let target = self.geometry_for(host).offset_for_index(index);
        if let SnapDecision::Issued { target, mode } = self.snap.converge(target, host) {
            self.events
                .push_back(SelectorEvent::SnapIssued { target, mode });
        }
        let changed = self.engine.publish(Some(index));
        self.events
            .push_back(SelectorEvent::Selected { index, changed });
    }

    fn sync_activation(&mut self) {
        let active = self.activation.is_active();
        if active == self.crossfade.target_active() {
            return;
        }
        match self.host.as_mut() {
            Some(host) => {
                self.crossfade.set_active(active, host);
            }
            None => self.crossfade.jump_to(active),
        }
        tracing::debug!(
            message = "selector.activation",
            action = "sync",
            selector = self.id.get(),
            active
        );
        self.events
            .push_back(SelectorEvent::ActivationChanged { active });
    }

    fn request_current_selection(&mut self) {
        if self.engine.has_pending() {
            return;
        }
        if let Some(index) = self.engine.selected() {
            self.engine.request_select(to_raw_index(index));
        }
    }

    fn refresh_margin(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let layout = self.engine.layout();
        let insets =
            WheelGeometry::centering_insets(host.viewport_height(), layout.height, layout.margin);
        self.content_margin = insets;
        host.set_content_margin(insets);
    }

    fn centering_insets(&self, host: &H) -> Insets {
        let layout = self.engine.layout();
        WheelGeometry::centering_insets(host.viewport_height(), layout.height, layout.margin)
    }

    fn geometry_for(&self, host: &H) -> WheelGeometry {
        wheel_geometry(
            host,
            self.content_margin,
            self.engine.layout().height,
            self.engine.len(),
        )
    }

    fn with_host<R>(&mut self, f: impl FnOnce(&mut Self, &mut H) -> R) -> Option<R> {
        let mut host = self.host.take()?;
        let out = f(self, &mut host);
        self.host = Some(host);
        Some(out)
    }
}

impl<C, H> Drop for WheelSelector<C, H> {
    fn drop(&mut self) {
        self.coordinator.deactivate(self.id);
    }
}

fn wheel_geometry<V: ScrollViewport + ?Sized>(
    viewport: &V,
    margin: Insets,
    item_height: f64,
    count: usize,
) -> WheelGeometry {
    WheelGeometry {
        viewport_height: viewport.viewport_height(),
        extent: viewport.measured_extent(),
        margin,
        count,
        item_height,
    }
}

fn to_raw_index(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

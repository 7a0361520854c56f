//! End-to-end selector flows against the recording host.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use wheelpick_widgets::activation::{ActivationCell, ActivationTarget};
use wheelpick_widgets::harness::RecordingHost;
use wheelpick_widgets::snap::SnapPhase;
use wheelpick_widgets::{
    ActivationCoordinator, ScrollMode, ScrollViewport, SelectorConfig, SelectorEvent, SelectorId,
    TapOutcome, WheelSelector,
};

type Selector = WheelSelector<&'static str, RecordingHost>;

const FRAME: Duration = Duration::from_millis(16);

fn selector(coordinator: &Rc<ActivationCoordinator>, items: &[&'static str]) -> Selector {
    let mut selector =
        Selector::new(SelectorConfig::default(), Rc::clone(coordinator)).expect("valid config");
    selector.set_items(items.iter().copied());
    selector.attach(RecordingHost::new(300.0, 100.0 * items.len() as f64));
    selector.tick(Duration::ZERO);
    selector
}

/// Report the end of the host's smooth scroll the way a real viewport would.
fn settle(selector: &mut Selector) {
    let landed = selector
        .host_mut()
        .and_then(RecordingHost::finish_smooth_scroll);
    if let Some(offset) = landed {
        selector.on_offset_changing(offset, false);
        selector.on_offset_changing(offset, true);
    }
    selector.tick(FRAME);
}

#[test]
fn tap_positions_on_three_items() {
    let coordinator = Rc::new(ActivationCoordinator::new());
    let mut selector = selector(&coordinator, &["A", "B", "C"]);
    selector.activate();

    assert_eq!(selector.on_tap(-10.0), TapOutcome::Rejected);
    assert_eq!(selector.on_tap(650.0), TapOutcome::Rejected);
    assert_eq!(selector.on_tap(150.0), TapOutcome::Selecting(1));
    selector.tick(FRAME);
    settle(&mut selector);
    assert_eq!(selector.selected_index(), Some(1));
    assert_eq!(selector.placeholder_content(), Some(&"B"));
}

#[test]
fn fling_settles_on_nearest_leading_item() {
    let coordinator = Rc::new(ActivationCoordinator::new());
    let mut selector = selector(&coordinator, &["00", "01", "02", "03", "04", "05"]);

    for offset in [30.0, 120.0, 260.0, 330.0, 345.0] {
        selector.on_offset_changing(offset, false);
        selector.tick(FRAME);
    }
    selector.on_offset_changing(345.0, true);
    assert_eq!(selector.selected_index(), Some(0));
    selector.tick(FRAME);
    assert_eq!(selector.selected_index(), Some(3));
    assert_eq!(selector.phase(), SnapPhase::Snapping);

    settle(&mut selector);
    assert_eq!(selector.phase(), SnapPhase::AtRest);
    assert_eq!(selector.host().map(ScrollViewport::scroll_offset), Some(300.0));
    let events: Vec<_> = selector.drain_events().collect();
    assert!(events.contains(&SelectorEvent::SnapIssued {
        target: 300.0,
        mode: ScrollMode::Smooth
    }));
    assert_eq!(
        events.last(),
        Some(&SelectorEvent::Selected {
            index: 3,
            changed: false
        })
    );
}

#[test]
fn only_one_sibling_is_active() {
    let coordinator = Rc::new(ActivationCoordinator::new());
    let mut hours = selector(&coordinator, &["00", "01", "02"]);
    let mut minutes = selector(&coordinator, &["00", "15", "30", "45"]);

    assert_eq!(hours.on_tap(150.0), TapOutcome::Activated);
    assert_eq!(minutes.on_tap(150.0), TapOutcome::Activated);
    assert!(!hours.is_active());
    assert!(minutes.is_active());
    assert_eq!(coordinator.active_id(), Some(minutes.id()));

    for _ in 0..20 {
        hours.tick(FRAME);
        minutes.tick(FRAME);
    }
    assert_eq!(hours.opacity(), 0.0);
    assert!(hours.is_placeholder_visible());
    assert_eq!(minutes.opacity(), 1.0);
    assert!(!minutes.is_placeholder_visible());
}

/// Target that tries to take the slot back while being displaced.
struct Stubborn {
    cell: ActivationCell,
    coordinator: Rc<ActivationCoordinator>,
    me: Cell<Option<std::rc::Weak<Stubborn>>>,
    deactivations: Cell<u32>,
}

impl ActivationTarget for Stubborn {
    fn selector_id(&self) -> SelectorId {
        self.cell.selector_id()
    }

    fn set_active(&self, active: bool) {
        self.cell.set_active(active);
        if active {
            return;
        }
        self.deactivations.set(self.deactivations.get() + 1);
        if let Some(me) = self.me.take().and_then(|weak| weak.upgrade()) {
            self.coordinator.activate(&me);
        }
    }
}

#[test]
fn reentrant_activation_keeps_single_active() {
    let coordinator = Rc::new(ActivationCoordinator::new());
    let stubborn = Rc::new(Stubborn {
        cell: ActivationCell::new(SelectorId::next()),
        coordinator: Rc::clone(&coordinator),
        me: Cell::new(None),
        deactivations: Cell::new(0),
    });
    stubborn.me.set(Some(Rc::downgrade(&stubborn)));
    coordinator.activate(&stubborn);

    let mut selector = selector(&coordinator, &["a", "b"]);
    selector.activate();

    assert!(selector.is_active());
    assert!(!stubborn.cell.is_active());
    assert_eq!(coordinator.active_id(), Some(selector.id()));
    assert_eq!(stubborn.deactivations.get(), 2);
}

#[test]
fn detach_and_reattach_resumes() {
    let coordinator = Rc::new(ActivationCoordinator::new());
    let mut selector = selector(&coordinator, &["a", "b", "c"]);
    let host = selector.detach().expect("attached");
    selector.set_selected_index(2);
    selector.tick(FRAME);
    assert_eq!(selector.selected_index(), Some(0));

    selector.attach(host);
    selector.tick(FRAME);
    assert_eq!(selector.selected_index(), Some(2));
}

//! Property-based invariant tests for the composed selector.
//!
//! 1. Intermediate offset notifications never change the selection, however
//!    many update turns pass in between.
//! 2. After any settle, the next turn selects a valid index and either
//!    leaves the viewport alone or issues exactly one command toward that
//!    index's resting offset.
//! 3. Re-selecting the selected item while at rest issues no command.

use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use wheelpick_widgets::harness::RecordingHost;
use wheelpick_widgets::snap::SnapPhase;
use wheelpick_widgets::{ActivationCoordinator, SelectorConfig, WheelSelector};

type Selector = WheelSelector<usize, RecordingHost>;

fn attached(count: usize, item_height: f64, viewport: f64) -> Selector {
    let config = SelectorConfig::default().item_size(100.0, item_height);
    let mut selector =
        Selector::new(config, Rc::new(ActivationCoordinator::new())).expect("valid config");
    selector.set_items(0..count);
    selector.attach(RecordingHost::new(viewport, item_height * count as f64));
    selector.tick(Duration::ZERO);
    selector
}

fn layout() -> impl Strategy<Value = (usize, f64, f64)> {
    (1usize..40, 10u32..200).prop_flat_map(|(count, height)| {
        let height = f64::from(height);
        (Just(count), Just(height), height..height * 8.0)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// Gesture notifications
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intermediate_offsets_never_select(
        (count, height, viewport) in layout(),
        offsets in proptest::collection::vec(-500.0f64..5_000.0, 1..32),
        ticks in proptest::collection::vec(0u64..200, 1..32),
    ) {
        let mut selector = attached(count, height, viewport);
        let before = selector.selected_index();
        for (offset, ms) in offsets.iter().zip(ticks.iter().cycle()) {
            selector.on_offset_changing(*offset, false);
            selector.tick(Duration::from_millis(*ms));
            prop_assert_eq!(selector.selected_index(), before);
            prop_assert_eq!(selector.highlighted_index(), None);
        }
    }

    #[test]
    fn settle_selects_valid_index(
        (count, height, viewport) in layout(),
        offset in -500.0f64..5_000.0,
    ) {
        let mut selector = attached(count, height, viewport);
        selector.on_offset_changing(offset, false);
        selector.on_offset_changing(offset, true);
        selector.tick(Duration::ZERO);

        let index = selector.selected_index().expect("items present");
        prop_assert!(index < count);
        prop_assert_eq!(selector.highlighted_index(), Some(index));

        let geometry = selector.geometry().expect("attached");
        let commands = selector.host().expect("attached").scroll_commands();
        prop_assert!(commands.len() <= 1);
        if let Some(command) = commands.first() {
            prop_assert_eq!(command.target, geometry.offset_for_index(index));
            prop_assert_eq!(selector.phase(), SnapPhase::Snapping);
        }
    }

    #[test]
    fn reselect_at_rest_is_silent(
        (count, height, viewport) in layout(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut selector = attached(count, height, viewport);
        let index = pick.index(count);
        selector.set_selected_index(index);
        selector.tick(Duration::ZERO);
        if let Some(host) = selector.host_mut() {
            host.finish_smooth_scroll();
        }
        let landed = selector
            .geometry()
            .expect("attached")
            .offset_for_index(index);
        selector.on_offset_changing(landed, true);
        selector.tick(Duration::ZERO);
        if let Some(host) = selector.host_mut() {
            host.clear_log();
        }

        selector.set_selected_index(index);
        selector.tick(Duration::ZERO);
        prop_assert_eq!(selector.selected_index(), Some(index));
        prop_assert!(selector.host().expect("attached").scroll_commands().is_empty());
    }
}

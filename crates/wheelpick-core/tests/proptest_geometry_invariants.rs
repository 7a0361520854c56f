//! Property-based invariant tests for the wheel geometry.
//!
//! 1. offset → index round-trips for every valid item.
//! 2. The index under the viewport center never decreases as offset grows.
//! 3. Empty stacks degenerate to zero everywhere.
//! 4. A resting offset is always settled against itself.
//! 5. Taps inside an item map to that item.

use proptest::prelude::*;
use wheelpick_core::geometry::{Thickness, WheelGeometry, is_settled_at};

// ── Helpers ─────────────────────────────────────────────────────────────

fn geometry(count: usize, item_height: f64, margin: Thickness, viewport: f64) -> WheelGeometry {
    let insets = WheelGeometry::centering_insets(viewport, item_height, margin);
    let slot = item_height + margin.vertical_sum();
    WheelGeometry {
        viewport_height: viewport,
        extent: insets.top + slot * count as f64 + insets.bottom,
        margin: insets,
        count,
        item_height,
    }
}

fn layout() -> impl Strategy<Value = (usize, f64, Thickness, f64)> {
    (
        1usize..=60,
        2.0f64..400.0,
        (0.0f64..30.0, 0.0f64..30.0),
        0.0f64..1.0,
    )
        .prop_map(|(count, height, (top, bottom), viewport_scale)| {
            let margin = Thickness::vertical(top, bottom);
            let slot = height + top + bottom;
            // Viewport at least as tall as one slot, up to the whole stack.
            let viewport = slot + viewport_scale * slot * (count as f64 - 1.0);
            (count, height, margin, viewport)
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_round_trips_through_offset((count, height, margin, viewport) in layout()) {
        let g = geometry(count, height, margin, viewport);
        for i in 0..count {
            let offset = g.offset_for_index(i);
            prop_assert_eq!(
                g.index_for_offset(offset), i as i64,
                "item {} of {} (height {}, offset {})", i, count, height, offset
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Monotonic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_is_monotonic_in_offset(
        (count, height, margin, viewport) in layout(),
        a in 0.0f64..10_000.0,
        b in 0.0f64..10_000.0,
    ) {
        let g = geometry(count, height, margin, viewport);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(g.index_for_offset(lo) <= g.index_for_offset(hi));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Empty stack
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_stack_degenerates_to_zero(
        height in 2.0f64..400.0,
        viewport in 1.0f64..2000.0,
        offset in -500.0f64..5000.0,
    ) {
        let g = geometry(0, height, Thickness::default(), viewport);
        prop_assert_eq!(g.per_item(), 0.0);
        prop_assert_eq!(g.index_for_offset(offset), 0);
        prop_assert_eq!(g.offset_for_index(3), 0.0);
        prop_assert_eq!(g.index_for_tap(offset), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Settled against itself
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resting_offset_is_settled((count, height, margin, viewport) in layout(), pick in 0usize..60) {
        let g = geometry(count, height, margin, viewport);
        let offset = g.offset_for_index(pick % count);
        prop_assert!(is_settled_at(offset, offset));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Taps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tap_inside_item_hits_that_item(count in 1usize..40, height in 10.0f64..200.0, pick in 0usize..40, frac in 0.01f64..0.99) {
        let g = geometry(count, height, Thickness::default(), height * 3.0);
        let index = pick % count;
        let y = (index as f64 + frac) * height;
        prop_assert_eq!(g.index_for_tap(y), Some(index));
    }
}

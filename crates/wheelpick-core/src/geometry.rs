#![forbid(unsafe_code)]

//! Offset ↔ index math for a centered vertical item stack.
//!
//! The stack is laid out inside a scrollable surface with an extra content
//! margin on top and bottom (the *centering margin*) so that the first and
//! last items can be scrolled to the vertical center of the viewport.
//!
//! ```text
//!   ┌──────────── viewport ────────────┐
//!   │  centering margin (top)          │
//!   │  ┌────────── item 0 ──────────┐  │
//!   │  └────────────────────────────┘  │  ← viewport center
//!   │  ┌────────── item 1 ──────────┐  │
//!   ...
//! ```
//!
//! # Invariants
//!
//! 1. [`offset_per_item`] is `0.0` for an empty stack; every derived
//!    offset or index then degenerates to `0`.
//! 2. [`index_for_offset`] truncates (floors): the index is the item whose
//!    leading edge has passed the viewport center.
//! 3. [`offset_for_index`] rounds half-to-even, matching [`is_settled_at`].
//! 4. For a non-empty stack `index_for_offset(offset_for_index(i)) == i`
//!    whenever the item is taller than one unit.
//!
//! # Failure Modes
//!
//! - Non-finite inputs propagate as non-finite outputs; callers validate
//!   item sizes before they reach this module.

/// Per-side spacing around a single item, in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    /// Same spacing on all four sides.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Vertical spacing only.
    #[must_use]
    pub const fn vertical(top: f64, bottom: f64) -> Self {
        Self {
            left: 0.0,
            top,
            right: 0.0,
            bottom,
        }
    }

    /// Sum of top and bottom spacing.
    #[must_use]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Top/bottom content margin applied to the whole item stack.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f64,
    pub bottom: f64,
}

/// Scroll distance covered by one item.
///
/// `extent` is the measured height of the scrollable content including the
/// stack margins.
#[must_use]
pub fn offset_per_item(extent: f64, margin_top: f64, margin_bottom: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (extent - margin_top - margin_bottom) / count as f64
}

/// Index of the item under the viewport center for a scroll `offset`.
///
/// May be negative (overscroll above the first item) or `>= count`
/// (overscroll past the last); clamping is the caller's decision.
#[must_use]
pub fn index_for_offset(offset: f64, margin_top: f64, viewport_height: f64, per_item: f64) -> i64 {
    if per_item <= 0.0 {
        return 0;
    }
    let position = (offset + viewport_height / 2.0 - margin_top) / per_item;
    position.floor() as i64
}

/// Resting scroll offset that centers item `index`.
#[must_use]
pub fn offset_for_index(index: usize, per_item: f64) -> f64 {
    (index as f64 * per_item).round_ties_even()
}

/// Margin that lets an edge item scroll to the viewport center.
///
/// `margin_edge` is the item's own margin on that edge.
#[must_use]
pub fn centering_margin(viewport_height: f64, margin_edge: f64, item_height: f64) -> f64 {
    viewport_height / 2.0 - margin_edge - item_height / 2.0
}

/// Whether a viewport at `current` already rests on `target`.
///
/// Exact comparison after half-to-even rounding of both sides. Repeated
/// float conversions can drift across a rounding boundary, in which case a
/// redundant snap is issued.
#[must_use]
pub fn is_settled_at(target: f64, current: f64) -> bool {
    target.round_ties_even() == current.round_ties_even()
}

/// Snapshot of everything the offset ↔ index math depends on.
///
/// Built fresh from the host whenever a decision is made, so it never goes
/// stale across a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Measured height of the scrollable content.
    pub extent: f64,
    /// Centering margin applied to the item stack.
    pub margin: Insets,
    /// Number of items in the stack.
    pub count: usize,
    /// Height of one item (excluding its own margin).
    pub item_height: f64,
}

impl WheelGeometry {
    /// Compute the centering margin for a viewport and item layout.
    #[must_use]
    pub fn centering_insets(viewport_height: f64, item_height: f64, item_margin: Thickness) -> Insets {
        Insets {
            top: centering_margin(viewport_height, item_margin.top, item_height),
            bottom: centering_margin(viewport_height, item_margin.bottom, item_height),
        }
    }

    /// Scroll distance covered by one item.
    #[must_use]
    pub fn per_item(&self) -> f64 {
        offset_per_item(self.extent, self.margin.top, self.margin.bottom, self.count)
    }

    /// Raw (unclamped) index under the viewport center.
    #[must_use]
    pub fn index_for_offset(&self, offset: f64) -> i64 {
        index_for_offset(offset, self.margin.top, self.viewport_height, self.per_item())
    }

    /// Resting offset for `index`.
    #[must_use]
    pub fn offset_for_index(&self, index: usize) -> f64 {
        offset_for_index(index, self.per_item())
    }

    /// Map a tap position (relative to the item stack origin) to an item.
    ///
    /// The tap is shifted up by half an item so that it is compared against
    /// item centers, the same way a scroll offset is. Returns `None` for taps
    /// above the first item or past the last one.
    ///
    /// Only `y < 0` counts as above the first item: a tap in the top half of
    /// item 0 selects it rather than being rejected by the shifted value.
    #[must_use]
    pub fn index_for_tap(&self, y: f64) -> Option<usize> {
        if y < 0.0 || self.count == 0 {
            return None;
        }
        let index = self.index_for_offset(y - self.item_height / 2.0);
        usize::try_from(index).ok().filter(|&i| i < self.count)
    }
}

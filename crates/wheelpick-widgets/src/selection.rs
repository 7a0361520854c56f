#![forbid(unsafe_code)]

//! Items, highlight, and the published selection.
//!
//! The highlight is what the user sees marked right now; the selection is
//! what the selector has committed to. They diverge mid-gesture, when the
//! highlight is dropped while the selection keeps its last value.
//!
//! Select requests are deferred: [`SelectionEngine::request_select`] only
//! records the request, and the owner resolves it on its next update turn.
//! A newer request made before then replaces the older one.
//!
//! # Invariants
//!
//! 1. `selected` is `None` iff there are no items, and otherwise a valid
//!    index.
//! 2. `highlighted` is `None` or a valid index, and exactly that item (and
//!    no other) reports `is_highlighted()`.

use wheelpick_core::geometry::WheelGeometry;

use crate::item::{Item, ItemLayout};

/// Item storage and selection bookkeeping for one selector.
#[derive(Debug, Clone)]
pub struct SelectionEngine<C> {
    items: Vec<Item<C>>,
    layout: ItemLayout,
    highlight: Option<usize>,
    selected: Option<usize>,
    pending: Option<i64>,
}

impl<C> Default for SelectionEngine<C> {
    fn default() -> Self {
        Self::new(ItemLayout::default())
    }
}

impl<C> SelectionEngine<C> {
    #[must_use]
    pub fn new(layout: ItemLayout) -> Self {
        Self {
            items: Vec::new(),
            layout,
            highlight: None,
            selected: None,
            pending: None,
        }
    }

    /// Replace every item.
    ///
    /// The highlight is cleared. An existing selection is clamped into the
    /// new sequence; with no selection a non-empty sequence selects index 0.
    /// Returns the resulting selection.
    pub fn rebuild_items<I>(&mut self, source: I, layout: ItemLayout) -> Option<usize>
    where
        I: IntoIterator<Item = C>,
    {
        self.layout = layout;
        self.items = source
            .into_iter()
            .enumerate()
            .map(|(index, content)| Item::new(content, index, layout))
            .collect();
        self.highlight = None;
        self.selected = match self.items.len() {
            0 => None,
            len => Some(self.selected.map_or(0, |s| s.min(len - 1))),
        };
        tracing::debug!(
            message = "selector.items",
            count = self.items.len(),
            selected = ?self.selected
        );
        self.selected
    }

    /// Apply a new layout to every existing item.
    pub fn relayout(&mut self, layout: ItemLayout) {
        self.layout = layout;
        for item in &mut self.items {
            item.set_layout(layout);
        }
    }

    /// Record a select request for the next update turn.
    ///
    /// `index` is unclamped; out-of-range values are clamped on resolve.
    /// Returns `true` if an earlier request was superseded.
    pub fn request_select(&mut self, index: i64) -> bool {
        let superseded = self.pending.replace(index);
        if let Some(previous) = superseded {
            tracing::trace!(
                message = "selector.select",
                action = "supersede",
                previous,
                index
            );
        }
        superseded.is_some()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the deferred request, if any.
    pub fn take_pending(&mut self) -> Option<i64> {
        self.pending.take()
    }

    /// Clamp a raw index into the current item range.
    ///
    /// `count` itself is reachable from offset math at the far end of the
    /// scroll range and maps to the last item.
    #[must_use]
    pub fn resolve(&self, index: i64) -> Option<usize> {
        let last = self.items.len().checked_sub(1)?;
        let clamped = index.clamp(0, i64::try_from(last).unwrap_or(i64::MAX));
        usize::try_from(clamped).ok()
    }

    /// Move the highlight. An out-of-range index clears it.
    pub fn highlight(&mut self, index: Option<usize>) {
        if self.highlight == index {
            return;
        }
        self.clear_highlight();
        let Some(item) = index.and_then(|i| self.items.get_mut(i)) else {
            return;
        };
        item.set_highlighted(true);
        self.highlight = index;
    }

    pub fn clear_highlight(&mut self) {
        if let Some(item) = self.highlight.take().and_then(|i| self.items.get_mut(i)) {
            item.set_highlighted(false);
        }
    }

    /// Commit `index` as the selection. Returns whether it changed.
    pub fn publish(&mut self, index: Option<usize>) -> bool {
        let changed = self.selected != index;
        self.selected = index;
        tracing::debug!(
            message = "selector.select",
            action = "publish",
            selected = ?index,
            changed
        );
        changed
    }

    /// Item under a tap at `y`, relative to the item stack origin.
    #[must_use]
    pub fn index_for_tap_position(&self, y: f64, geometry: &WheelGeometry) -> Option<usize> {
        geometry.index_for_tap(y).filter(|&i| i < self.items.len())
    }

    #[must_use]
    pub fn items(&self) -> &[Item<C>] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn layout(&self) -> ItemLayout {
        self.layout
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlight
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&Item<C>> {
        self.selected.and_then(|i| self.items.get(i))
    }

    #[must_use]
    pub fn highlighted_item(&self) -> Option<&Item<C>> {
        self.highlight.and_then(|i| self.items.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelpick_core::geometry::Thickness;

    fn engine(labels: &[&'static str]) -> SelectionEngine<&'static str> {
        let mut engine = SelectionEngine::default();
        engine.rebuild_items(labels.iter().copied(), ItemLayout::default());
        engine
    }

    fn highlighted_flags<C>(engine: &SelectionEngine<C>) -> Vec<bool> {
        engine.items().iter().map(Item::is_highlighted).collect()
    }

    #[test]
    fn rebuild_selects_first_when_nothing_selected() {
        let engine = engine(&["a", "b", "c"]);
        assert_eq!(engine.selected(), Some(0));
        assert_eq!(engine.highlighted(), None);
        assert_eq!(engine.items()[2].index(), 2);
        assert_eq!(engine.items()[1].content(), &"b");
    }

    #[test]
    fn rebuild_empty_clears_selection() {
        let mut engine = engine(&["a"]);
        assert_eq!(engine.rebuild_items(Vec::new(), ItemLayout::default()), None);
        assert!(engine.is_empty());
        assert_eq!(engine.selected_item().map(Item::content), None);
    }

    #[test]
    fn rebuild_clamps_existing_selection() {
        let mut engine = engine(&["a", "b", "c", "d"]);
        engine.publish(Some(3));
        engine.highlight(Some(3));
        assert_eq!(engine.rebuild_items(["x", "y"], ItemLayout::default()), Some(1));
        assert_eq!(engine.highlighted(), None);
        assert_eq!(highlighted_flags(&engine), vec![false, false]);
    }

    #[test]
    fn resolve_clamps_into_range() {
        let engine = engine(&["a", "b", "c"]);
        assert_eq!(engine.resolve(-4), Some(0));
        assert_eq!(engine.resolve(1), Some(1));
        assert_eq!(engine.resolve(3), Some(2));
        assert_eq!(engine.resolve(99), Some(2));
        assert_eq!(SelectionEngine::<u8>::default().resolve(0), None);
    }

    #[test]
    fn newer_request_supersedes() {
        let mut engine = engine(&["a", "b", "c"]);
        assert!(!engine.request_select(1));
        assert!(engine.request_select(2));
        assert_eq!(engine.take_pending(), Some(2));
        assert!(!engine.has_pending());
    }

    #[test]
    fn highlight_marks_exactly_one_item() {
        let mut engine = engine(&["a", "b", "c"]);
        engine.highlight(Some(1));
        assert_eq!(highlighted_flags(&engine), vec![false, true, false]);
        engine.highlight(Some(2));
        assert_eq!(highlighted_flags(&engine), vec![false, false, true]);
        assert_eq!(engine.highlighted_item().map(Item::content), Some(&"c"));
    }

    #[test]
    fn out_of_range_highlight_means_none() {
        let mut engine = engine(&["a", "b", "c"]);
        engine.highlight(Some(0));
        engine.highlight(Some(3));
        assert_eq!(engine.highlighted(), None);
        assert_eq!(highlighted_flags(&engine), vec![false, false, false]);
    }

    #[test]
    fn publish_reports_change() {
        let mut engine = engine(&["a", "b"]);
        assert!(!engine.publish(Some(0)));
        assert!(engine.publish(Some(1)));
        assert_eq!(engine.selected_item().map(Item::content), Some(&"b"));
    }

    #[test]
    fn relayout_updates_items() {
        let mut engine = engine(&["a", "b"]);
        let layout = ItemLayout {
            height: 40.0,
            width: 80.0,
            margin: Thickness::vertical(2.0, 2.0),
        };
        engine.relayout(layout);
        assert!(engine.items().iter().all(|item| item.layout() == layout));
        assert_eq!(engine.layout().slot_height(), 44.0);
    }

    #[test]
    fn tap_position_uses_item_centers() {
        let engine = engine(&["a", "b", "c"]);
        let margin = WheelGeometry::centering_insets(300.0, 100.0, Thickness::default());
        let geometry = WheelGeometry {
            viewport_height: 300.0,
            extent: margin.top + 300.0 + margin.bottom,
            margin,
            count: engine.len(),
            item_height: 100.0,
        };
        assert_eq!(engine.index_for_tap_position(150.0, &geometry), Some(1));
        assert_eq!(engine.index_for_tap_position(-10.0, &geometry), None);
        assert_eq!(engine.index_for_tap_position(650.0, &geometry), None);
    }
}

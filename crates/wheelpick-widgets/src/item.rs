#![forbid(unsafe_code)]

//! Selector items.

use wheelpick_core::geometry::Thickness;

/// Size and spacing every item in a selector is built with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayout {
    pub height: f64,
    pub width: f64,
    pub margin: Thickness,
}

impl Default for ItemLayout {
    fn default() -> Self {
        Self {
            height: 100.0,
            width: 100.0,
            margin: Thickness::default(),
        }
    }
}

impl ItemLayout {
    /// Vertical space one item occupies, margins included.
    #[must_use]
    pub fn slot_height(&self) -> f64 {
        self.height + self.margin.vertical_sum()
    }
}

/// One entry of the wheel.
///
/// Items are rebuilt wholesale whenever the content source is replaced;
/// `index` is always the item's position in the current sequence.
#[derive(Debug, Clone)]
pub struct Item<C> {
    content: C,
    index: usize,
    highlighted: bool,
    layout: ItemLayout,
}

impl<C> Item<C> {
    pub(crate) fn new(content: C, index: usize, layout: ItemLayout) -> Self {
        Self {
            content,
            index,
            highlighted: false,
            layout,
        }
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this item is drawn in its selected visual state.
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    #[must_use]
    pub fn layout(&self) -> ItemLayout {
        self.layout
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub(crate) fn set_layout(&mut self, layout: ItemLayout) {
        self.layout = layout;
    }
}

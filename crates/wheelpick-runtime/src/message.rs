#![forbid(unsafe_code)]

//! Messages that drive one selector on the update thread.

use std::time::Duration;

use wheelpick_widgets::{SelectorHost, TapOutcome, WheelSelector};

/// Everything a host or timer can ask of a selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorMessage<C> {
    /// The viewport offset changed; `settled` marks the final notification.
    OffsetChanging { offset: f64, settled: bool },
    /// Tap at `y`, relative to the top of the item stack.
    Tap { y: f64 },
    /// The viewport was resized.
    Resize,
    /// Time passed.
    Tick(Duration),
    Activate,
    Deactivate,
    /// Request an index.
    Select(usize),
    /// Replace every item.
    ReplaceItems(Vec<C>),
}

/// Route `msg` to the matching selector method.
///
/// Returns the tap outcome for [`SelectorMessage::Tap`], `None` otherwise.
pub fn apply_message<C, H: SelectorHost>(
    selector: &mut WheelSelector<C, H>,
    msg: SelectorMessage<C>,
) -> Option<TapOutcome> {
    match msg {
        SelectorMessage::OffsetChanging { offset, settled } => {
            selector.on_offset_changing(offset, settled);
        }
        SelectorMessage::Tap { y } => return Some(selector.on_tap(y)),
        SelectorMessage::Resize => selector.on_resize(),
        SelectorMessage::Tick(dt) => selector.tick(dt),
        SelectorMessage::Activate => selector.activate(),
        SelectorMessage::Deactivate => selector.deactivate(),
        SelectorMessage::Select(index) => selector.set_selected_index(index),
        SelectorMessage::ReplaceItems(items) => selector.set_items(items),
    }
    None
}

#![forbid(unsafe_code)]

//! Single-slot registry of the one active selector among siblings.
//!
//! Selectors register a weak [`ActivationTarget`] handle with a shared
//! [`ActivationCoordinator`]. Activating one deactivates whichever other
//! selector held the slot, synchronously and before the new one is stored.
//! The coordinator is the only code that flips a target's active flag.
//!
//! # Invariants
//!
//! 1. At most one target is active per coordinator.
//! 2. Activating an already-active target does nothing.
//! 3. `deactivate(id)` only clears the slot when it holds `id`.
//! 4. No `RefCell` borrow is held while a target callback runs, so targets
//!    may call back into the coordinator.
//!
//! # Failure Modes
//!
//! - A target dropped while active leaves a dead weak handle behind; the
//!   next activation clears it without calling anything.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static SELECTOR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique selector identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectorId(u64);

impl SelectorId {
    /// Allocate a fresh id.
    #[must_use]
    pub fn next() -> Self {
        Self(SELECTOR_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Something the coordinator can switch on and off.
pub trait ActivationTarget {
    fn selector_id(&self) -> SelectorId;

    /// Called by the coordinator only.
    fn set_active(&self, active: bool);
}

/// Plain active flag tagged with its owner's id.
#[derive(Debug)]
pub struct ActivationCell {
    id: SelectorId,
    active: Cell<bool>,
}

impl ActivationCell {
    #[must_use]
    pub fn new(id: SelectorId) -> Self {
        Self {
            id,
            active: Cell::new(false),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl ActivationTarget for ActivationCell {
    fn selector_id(&self) -> SelectorId {
        self.id
    }

    fn set_active(&self, active: bool) {
        self.active.set(active);
    }
}

#[derive(Debug)]
struct ActiveEntry {
    id: SelectorId,
    target: Weak<dyn ActivationTarget>,
}

/// Shared "who is active" slot for a group of sibling selectors.
#[derive(Debug, Default)]
pub struct ActivationCoordinator {
    slot: RefCell<Option<ActiveEntry>>,
}

impl ActivationCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `target` the active selector, deactivating the previous one
    /// first. Returns `false` when `target` was already active.
    pub fn activate<T: ActivationTarget + 'static>(&self, target: &Rc<T>) -> bool {
        let id = target.selector_id();
        loop {
            let current = self
                .slot
                .borrow()
                .as_ref()
                .map(|entry| (entry.id, Weak::clone(&entry.target)));
            match current {
                Some((held, _)) if held == id => return false,
                Some((held, previous)) => {
                    // A callback may have swapped the slot since we looked.
                    let removed = self.take_if_held(held);
                    if removed
                        && let Some(previous) = previous.upgrade()
                    {
                        tracing::debug!(
                            message = "selector.activation",
                            action = "displace",
                            selector = held.get(),
                            by = id.get()
                        );
                        previous.set_active(false);
                    }
                }
                None => {
                    let weak: Weak<T> = Rc::downgrade(target);
                    let weak: Weak<dyn ActivationTarget> = weak;
                    *self.slot.borrow_mut() = Some(ActiveEntry { id, target: weak });
                    tracing::debug!(
                        message = "selector.activation",
                        action = "activate",
                        selector = id.get()
                    );
                    target.set_active(true);
                    return true;
                }
            }
        }
    }

    /// Clear the slot if it holds `id`. Returns whether anything changed.
    pub fn deactivate(&self, id: SelectorId) -> bool {
        let entry = {
            let mut slot = self.slot.borrow_mut();
            if slot.as_ref().is_some_and(|entry| entry.id == id) {
                slot.take()
            } else {
                None
            }
        };
        let Some(entry) = entry else {
            tracing::trace!(
                message = "selector.activation",
                action = "deactivate_ignored",
                selector = id.get()
            );
            return false;
        };
        tracing::debug!(
            message = "selector.activation",
            action = "deactivate",
            selector = id.get()
        );
        if let Some(target) = entry.target.upgrade() {
            target.set_active(false);
        }
        true
    }

    /// Id of the active selector, if its handle is still alive.
    #[must_use]
    pub fn active_id(&self) -> Option<SelectorId> {
        self.slot
            .borrow()
            .as_ref()
            .filter(|entry| entry.target.strong_count() > 0)
            .map(|entry| entry.id)
    }

    #[must_use]
    pub fn is_active(&self, id: SelectorId) -> bool {
        self.active_id() == Some(id)
    }

    fn take_if_held(&self, id: SelectorId) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.as_ref().is_some_and(|entry| entry.id == id) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

#![forbid(unsafe_code)]

//! Wheel list selector widget state.
//!
//! A [`WheelSelector`](selector::WheelSelector) is a vertically scrolling list
//! of fixed-height items that always comes to rest with one item centered.
//! This crate owns the state machines behind it; drawing, layout, and the
//! actual scroll surface belong to the host and are reached through the
//! traits in [`host`].
//!
//! # Pieces
//! - [`selection::SelectionEngine`]: items, highlight, published selection,
//!   and the one-turn deferred select request.
//! - [`snap::SnapStateMachine`]: at-rest / user-scrolling / snapping phases,
//!   scroll command planning, and the fail-safe debounce.
//! - [`activation::ActivationCoordinator`]: at most one active selector
//!   among siblings.
//! - [`crossfade::CrossfadeController`]: opacity and placeholder visibility
//!   across activation edges.
//! - [`config::SelectorConfig`]: per-instance sizing and timing.
//!
//! All of it runs on one update context. Time only advances through
//! [`WheelSelector::tick`](selector::WheelSelector::tick).

pub mod activation;
pub mod config;
pub mod crossfade;
pub mod error;
pub mod harness;
pub mod host;
pub mod item;
pub mod selection;
pub mod selector;
pub mod snap;

pub use activation::{ActivationCoordinator, SelectorId};
pub use config::SelectorConfig;
pub use error::ConfigError;
pub use host::{FadeSurface, ScrollMode, ScrollViewport, SelectorHost};
pub use selector::{SelectorEvent, TapOutcome, WheelSelector};

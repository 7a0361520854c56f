#![forbid(unsafe_code)]

//! Core: pure geometry, single-slot debouncing, and tween animation.
//!
//! # Role in wheelpick
//! `wheelpick-core` holds the host-independent pieces a wheel selector is
//! built from. Nothing in this crate knows about viewports, items, or
//! activation; it only converts numbers and counts time.
//!
//! # Primary responsibilities
//! - **geometry**: offset ↔ index mapping for a vertical stack of
//!   fixed-height items whose first and last entries can be centered.
//! - **debounce**: a single pending payload that fires once after a delay and
//!   is superseded by every reschedule.
//! - **animation**: a minimal [`Animation`](animation::Animation) trait and a
//!   linear [`Tween`](animation::Tween) used by the crossfade.
//!
//! # How it fits in the system
//! `wheelpick-widgets` composes these into the selector state machines, and
//! `wheelpick-runtime` supplies the update thread that advances time.

pub mod animation;
pub mod debounce;
pub mod geometry;

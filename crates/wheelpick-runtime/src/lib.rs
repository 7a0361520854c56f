#![forbid(unsafe_code)]

//! Update-thread plumbing for wheelpick selectors.
//!
//! # Role in wheelpick
//! Selectors are single-threaded: every notification, select request, and
//! timer fire must reach them on one update context. This crate provides
//! that context as a dedicated OS thread and the handles other threads use
//! to reach it.
//!
//! # Primary responsibilities
//! - **UpdateThread**: owns all selector state and processes messages in
//!   order. State is built on the thread itself, so `Rc`-based selectors
//!   never cross threads.
//! - **Dispatcher**: cloneable `Send` handle that posts onto the update
//!   thread.
//! - **FrameTicker**: posts elapsed wall-clock time at a fixed interval,
//!   which is how debounce fail-safes and fades advance.
//! - **SelectorMessage**: the message vocabulary for one selector.
//!
//! # How it fits in the system
//! Host callbacks arriving on other threads (input, layout, a real scroll
//! surface) are turned into [`SelectorMessage`]s and posted through a
//! [`Dispatcher`]; the update thread applies them with [`apply_message`].

pub mod dispatcher;
pub mod message;
pub mod ticker;

pub use dispatcher::{Dispatcher, Flow, UpdateThread};
pub use message::{SelectorMessage, apply_message};
pub use ticker::FrameTicker;

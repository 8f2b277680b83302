//! Input events in a host-neutral vocabulary.
//!
//! # Invariants
//! - Controllers consume `InputEvent`, never raw window-system events.
//! - Key bindings live in the host; this crate only names the logical keys.

pub mod event;

pub use event::{InputEvent, Key, PointerButton};

//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key events to
//! [`crate::types::BoardCommand`]s and turns mouse press/drag/release into the
//! [`crate::types::PointerEvent`]s the board engine understands.

pub mod map;
pub mod pointer;

pub use tui_dots_types as types;

pub use map::{handle_key_event, should_quit};
pub use pointer::PointerTracker;

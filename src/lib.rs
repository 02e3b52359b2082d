//! TUI Dots (workspace facade crate).
//!
//! Re-exports the member crates as `tui_dots::{core,input,term,types}` and hosts the pieces
//! that tie them together for the binary: configuration, the event log and the play session.

pub use tui_dots_core as core;
pub use tui_dots_input as input;
pub use tui_dots_term as term;
pub use tui_dots_types as types;

pub mod config;
pub mod event_log;
pub mod session;

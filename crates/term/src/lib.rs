//! Terminal presentation for the dots board.
//!
//! Rendering goes through a plain framebuffer rather than a widget toolkit, so each dot,
//! connector and border glyph is placed exactly. Everything except [`TerminalRenderer`] is
//! pure and unit-tested.

pub mod anim;
pub mod board_view;
pub mod fb;
pub mod render_throttle;
pub mod renderer;

pub use tui_dots_core as core;
pub use tui_dots_types as types;

pub use anim::{BoardAnimator, Pulse, Tween};
pub use board_view::{BoardGeometry, BoardView, HudView, Scene, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use render_throttle::{fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

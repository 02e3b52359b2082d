//! Core types module - shared data structures and constants
//!
//! This module defines the plain data shared by the engine, the input layer and the
//! terminal view. Nothing here depends on I/O, so the types are usable from core logic,
//! rendering and tests alike.
//!
//! # Board Geometry
//!
//! Cells live in a flat, row-major sequence: `index = row * cols + col`.
//! Row 0 is the **bottom** row, so "up" from a cell is `index + cols`. New dots fall in
//! from above the top row.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed frame step (~60 FPS) |
//! | `DROP_ANIM_MS` | 500 | Duration of a dot sliding into its new slot |
//! | `PULSE_MS` | 250 | Duration of each half of the selection pulse |
//!
//! # Examples
//!
//! ```
//! use tui_dots_types::{BoardCommand, Palette, PointerEvent, MAX_BOARD_DIM};
//!
//! let palette = Palette::default();
//! assert!(palette.len() >= 4);
//!
//! assert_eq!(BoardCommand::GrowRows.resize_delta(), (1, 0));
//! assert_ne!(PointerEvent::Down(3), PointerEvent::Enter(3));
//! assert_eq!(MAX_BOARD_DIM, 8);
//! ```

/// Palette index of a dot color.
pub type ColorId = u8;

/// Flat row-major cell index.
pub type CellIndex = usize;

/// Board rows used when nothing else is configured.
pub const DEFAULT_ROWS: u16 = 6;

/// Board columns used when nothing else is configured.
pub const DEFAULT_COLS: u16 = 6;

/// Number of active colors used when nothing else is configured.
pub const DEFAULT_COLORS: u8 = 4;

/// Largest board dimension the resize UI will forward to the engine.
pub const MAX_BOARD_DIM: u16 = 8;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Time for a shifted or refilled dot to reach its slot.
pub const DROP_ANIM_MS: u32 = 500;

/// Half-period of the selection pulse (grow, then shrink back).
pub const PULSE_MS: u32 = 250;

/// Peak scale of the selection pulse.
pub const PULSE_SCALE: f32 = 1.25;

/// Spacing between neighboring dots in world units.
pub const DEFAULT_INTERVAL: f32 = 1.0;

/// How far above the top row (in intervals) refilled dots start their fall.
pub const DEFAULT_DROP_MARGIN: f32 = 2.0;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Ordered list of dot colors.
///
/// A dot's identity is its index into the palette, never the RGB value, so two entries
/// with the same RGB would still be distinct colors for matching purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

/// Red, blue, green, yellow, purple, orange.
const DEFAULT_PALETTE: [Rgb; 6] = [
    Rgb::new(230, 80, 80),
    Rgb::new(80, 140, 230),
    Rgb::new(100, 210, 120),
    Rgb::new(240, 210, 80),
    Rgb::new(180, 110, 220),
    Rgb::new(255, 165, 0),
];

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for the built-in palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, id: ColorId) -> Option<Rgb> {
        self.colors.get(id as usize).copied()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}

/// Pointer gestures as the engine sees them.
///
/// The input layer resolves screen coordinates to cells before producing these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed over a dot
    Down(CellIndex),
    /// Dragged onto a dot (reported once per entry)
    Enter(CellIndex),
    /// Button released anywhere
    Up,
}

/// Board-level commands issued from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    /// Re-randomize every dot, keeping the size
    Reset,
    /// One more row
    GrowRows,
    /// One row fewer
    ShrinkRows,
    /// One more column
    GrowCols,
    /// One column fewer
    ShrinkCols,
}

impl BoardCommand {
    /// camelCase name, as written to `command` records in the event log.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardCommand::Reset => "reset",
            BoardCommand::GrowRows => "growRows",
            BoardCommand::ShrinkRows => "shrinkRows",
            BoardCommand::GrowCols => "growCols",
            BoardCommand::ShrinkCols => "shrinkCols",
        }
    }

    /// Row/column delta requested by a resize command; `(0, 0)` for reset.
    pub fn resize_delta(&self) -> (i32, i32) {
        match self {
            BoardCommand::Reset => (0, 0),
            BoardCommand::GrowRows => (1, 0),
            BoardCommand::ShrinkRows => (-1, 0),
            BoardCommand::GrowCols => (0, 1),
            BoardCommand::ShrinkCols => (0, -1),
        }
    }
}

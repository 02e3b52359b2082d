//! World positions of dots.
//!
//! Positions are for presentation only; matching never looks at them. The grid is centered
//! on the origin with `interval` spacing, row 0 at the bottom (+y is up).

use crate::types::{CellIndex, DEFAULT_DROP_MARGIN, DEFAULT_INTERVAL};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        Vec2 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    /// Distance between neighboring dots.
    pub interval: f32,
    /// Refilled dots start this many intervals above the top row.
    pub drop_margin: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            drop_margin: DEFAULT_DROP_MARGIN,
        }
    }
}

impl BoardLayout {
    /// Resting position of a cell on a `rows × cols` board.
    pub fn position(&self, rows: u16, cols: u16, index: CellIndex) -> Vec2 {
        let cols_us = cols.max(1) as usize;
        let row = (index / cols_us) as f32;
        let col = (index % cols_us) as f32;
        let cx = self.interval * (cols as f32 - 1.0) / 2.0;
        let cy = self.interval * (rows as f32 - 1.0) / 2.0;
        Vec2::new(col * self.interval - cx, row * self.interval - cy)
    }

    /// Height new dots fall from.
    pub fn drop_height(&self, rows: u16) -> f32 {
        let top = self.interval * (rows as f32 - 1.0) / 2.0;
        top + self.drop_margin * self.interval
    }

    /// Where a refilled dot for `index` appears before falling into place.
    pub fn drop_origin(&self, rows: u16, cols: u16, index: CellIndex) -> Vec2 {
        let rest = self.position(rows, cols, index);
        Vec2::new(rest.x, self.drop_height(rows))
    }
}

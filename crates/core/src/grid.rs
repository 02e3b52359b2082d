//! Grid module - the dot colors
//!
//! Flat row-major storage (`index = row * cols + col`) with row 0 at the bottom.
//! Every cell always holds a color; there is no empty state between operations.

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::rng::ColorSource;
use crate::types::{CellIndex, ColorId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    num_colors: u8,
    /// Flat array of colors, row-major order (row * cols + col)
    cells: Vec<ColorId>,
}

impl Grid {
    /// Create a grid with every cell sampled from `rng`.
    pub fn random<R: ColorSource + ?Sized>(
        rows: u16,
        cols: u16,
        num_colors: u8,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        validate(rows, cols, num_colors)?;
        let len = rows as usize * cols as usize;
        let cells = (0..len).map(|_| rng.next_color(num_colors)).collect();
        Ok(Self {
            rows,
            cols,
            num_colors,
            cells,
        })
    }

    /// Create a grid from explicit colors (row-major, bottom row first).
    pub fn from_colors(
        rows: u16,
        cols: u16,
        num_colors: u8,
        cells: Vec<ColorId>,
    ) -> Result<Self, BoardError> {
        validate(rows, cols, num_colors)?;
        let len = rows as usize * cols as usize;
        if cells.len() != len {
            return Err(BoardError::CellCountMismatch {
                expected: len,
                got: cells.len(),
            });
        }
        if let Some(&color) = cells.iter().find(|&&c| c >= num_colors) {
            return Err(BoardError::ColorOutOfRange { color, num_colors });
        }
        Ok(Self {
            rows,
            cols,
            num_colors,
            cells,
        })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[ColorId] {
        &self.cells
    }

    #[inline(always)]
    pub fn row_of(&self, index: CellIndex) -> usize {
        index / self.cols as usize
    }

    #[inline(always)]
    pub fn col_of(&self, index: CellIndex) -> usize {
        index % self.cols as usize
    }

    /// Flat index for (row, col); `None` when outside the board.
    pub fn index(&self, row: usize, col: usize) -> Option<CellIndex> {
        if row >= self.rows as usize || col >= self.cols as usize {
            return None;
        }
        Some(row * self.cols as usize + col)
    }

    pub fn check(&self, index: CellIndex) -> Result<(), BoardError> {
        if index >= self.cells.len() {
            return Err(BoardError::CellOutOfBounds {
                index,
                len: self.cells.len(),
            });
        }
        Ok(())
    }

    pub fn color(&self, index: CellIndex) -> Option<ColorId> {
        self.cells.get(index).copied()
    }

    pub(crate) fn set_color(&mut self, index: CellIndex, color: ColorId) {
        self.cells[index] = color;
    }

    /// Re-sample every cell, keeping the dimensions.
    pub fn randomize<R: ColorSource + ?Sized>(&mut self, rng: &mut R) {
        let n = self.num_colors;
        for cell in &mut self.cells {
            *cell = rng.next_color(n);
        }
    }

    /// True when `b` is directly left, right, above or below `a`.
    ///
    /// Horizontal neighbors must share a row; `a ± 1` across a row boundary is not adjacent.
    pub fn is_adjacent(&self, a: CellIndex, b: CellIndex) -> bool {
        let cols = self.cols as usize;
        let same_row = self.row_of(a) == self.row_of(b);
        (a + 1 == b && same_row)
            || (b + 1 == a && same_row)
            || a + cols == b
            || b + cols == a
    }

    /// In-bounds orthogonal neighbors of `index` (left, right, up, down).
    pub fn neighbors(&self, index: CellIndex) -> ArrayVec<CellIndex, 4> {
        let mut out = ArrayVec::new();
        let len = self.cells.len();
        if index >= len {
            return out;
        }
        let cols = self.cols as usize;
        let col = self.col_of(index);
        if col > 0 {
            out.push(index - 1);
        }
        if col + 1 < cols {
            out.push(index + 1);
        }
        if index + cols < len {
            out.push(index + cols);
        }
        if index >= cols {
            out.push(index - cols);
        }
        out
    }

    /// All cells holding `color`, ascending.
    pub fn cells_of_color(&self, color: ColorId) -> Vec<CellIndex> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == color)
            .map(|(i, _)| i)
            .collect()
    }
}

fn validate(rows: u16, cols: u16, num_colors: u8) -> Result<(), BoardError> {
    if rows == 0 || cols == 0 {
        return Err(BoardError::InvalidDimensions { rows, cols });
    }
    if num_colors == 0 {
        return Err(BoardError::NoColors);
    }
    Ok(())
}

use crate::grid::Grid;
use crate::selection::SelectionPath;
use crate::types::{CellIndex, ColorId};

/// Read-only copy of the board for renderers, logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoardSnapshot {
    pub rows: u16,
    pub cols: u16,
    pub num_colors: u8,
    /// Row-major colors, row 0 at the bottom.
    pub cells: Vec<ColorId>,
    pub path: Vec<CellIndex>,
    pub path_color: Option<ColorId>,
    /// Increments every time the grid contents are replaced or changed.
    pub board_id: u32,
    /// FNV-1a over dimensions and cells.
    pub board_hash: u64,
    /// Dots removed since the board was created.
    pub cleared_total: u32,
}

impl BoardSnapshot {
    pub(crate) fn capture(
        grid: &Grid,
        path: &SelectionPath,
        board_id: u32,
        cleared_total: u32,
    ) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            num_colors: grid.num_colors(),
            cells: grid.cells().to_vec(),
            path: path.cells().to_vec(),
            path_color: path.color(),
            board_id,
            board_hash: board_hash(grid.rows(), grid.cols(), grid.cells()),
            cleared_total,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn color_at(&self, row: usize, col: usize) -> Option<ColorId> {
        if row >= self.rows as usize || col >= self.cols as usize {
            return None;
        }
        self.cells.get(row * self.cols as usize + col).copied()
    }

    pub fn selecting(&self) -> bool {
        !self.path.is_empty()
    }
}

/// FNV-1a 64-bit over `rows`, `cols` and the cell colors.
pub fn board_hash(rows: u16, cols: u16, cells: &[ColorId]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    let header = [rows.to_le_bytes(), cols.to_le_bytes()];
    for b in header.iter().flatten().copied().chain(cells.iter().copied()) {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

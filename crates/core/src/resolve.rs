//! Clear and refill.
//!
//! A finished path turns into a clear set; the clear set is removed by collapsing each
//! affected column downward and refilling the top with fresh colors.

use crate::grid::Grid;
use crate::layout::{BoardLayout, Vec2};
use crate::rng::ColorSource;
use crate::selection::SelectionPath;
use crate::snapshot::BoardSnapshot;
use crate::types::{CellIndex, ColorId};

/// Where a cell's new dot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSource {
    /// Slid down from another cell in the same column.
    Shifted { from: CellIndex },
    /// Fell in from above the board with a fresh color.
    Refilled,
}

/// One cell whose dot changed during a clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTransition {
    pub index: CellIndex,
    pub old_color: ColorId,
    pub new_color: ColorId,
    pub from: Vec2,
    pub to: Vec2,
    pub source: TransitionSource,
}

/// Outcome of ending a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearResult {
    /// Removed cells, in processing order (descending index).
    pub cleared: Vec<CellIndex>,
    /// The path closed a loop and the whole color group was cleared.
    pub looped: bool,
    /// Color of the cleared path, `None` for a no-op.
    pub color: Option<ColorId>,
    /// One entry per changed cell, ascending index.
    pub transitions: Vec<CellTransition>,
    /// Board after the clear.
    pub snapshot: BoardSnapshot,
}

impl ClearResult {
    pub fn noop(snapshot: BoardSnapshot) -> Self {
        Self {
            cleared: Vec::new(),
            looped: false,
            color: None,
            transitions: Vec::new(),
            snapshot,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.cleared.is_empty()
    }
}

/// Cells removed by `path`, sorted descending, plus whether the loop bonus applied.
///
/// Paths shorter than two cells clear nothing. A path that revisits any cell clears every
/// cell with the color of its first dot.
pub fn clear_set(grid: &Grid, path: &SelectionPath) -> (Vec<CellIndex>, bool) {
    if path.len() < 2 {
        return (Vec::new(), false);
    }

    let looped = path.has_loop();
    let mut set = if looped {
        match path.first().and_then(|c| grid.color(c)) {
            Some(color) => grid.cells_of_color(color),
            None => path.distinct(),
        }
    } else {
        path.distinct()
    };

    set.sort_unstable_by(|a, b| b.cmp(a));
    set.dedup();
    (set, looped)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Cell(CellIndex),
    Refill,
}

/// Remove `cleared` (descending order) by shifting columns down and refilling the tops.
///
/// The whole set is processed in one pass from the highest index down. Within a column
/// that visits holes top-down, so a shift never moves a hole that is still pending.
pub fn collapse_and_refill<R: ColorSource + ?Sized>(
    grid: &mut Grid,
    cleared: &[CellIndex],
    rng: &mut R,
    layout: &BoardLayout,
) -> Vec<CellTransition> {
    let len = grid.len();
    let cols = grid.cols() as usize;
    let num_colors = grid.num_colors();
    let before: Vec<ColorId> = grid.cells().to_vec();
    let mut origin: Vec<Origin> = (0..len).map(Origin::Cell).collect();

    for &hole in cleared {
        if hole >= len {
            continue;
        }
        let mut cur = hole;
        let mut above = hole + cols;
        while above < len {
            grid.set_color(cur, grid.cells()[above]);
            origin[cur] = origin[above];
            cur = above;
            above += cols;
        }
        grid.set_color(cur, rng.next_color(num_colors));
        origin[cur] = Origin::Refill;
    }

    let (rows, cols) = (grid.rows(), grid.cols());
    origin
        .iter()
        .enumerate()
        .filter_map(|(index, o)| {
            let (from, source) = match *o {
                Origin::Cell(src) if src == index => return None,
                Origin::Cell(src) => (
                    layout.position(rows, cols, src),
                    TransitionSource::Shifted { from: src },
                ),
                Origin::Refill => (
                    layout.drop_origin(rows, cols, index),
                    TransitionSource::Refilled,
                ),
            };
            Some(CellTransition {
                index,
                old_color: before[index],
                new_color: grid.cells()[index],
                from,
                to: layout.position(rows, cols, index),
                source,
            })
        })
        .collect()
}

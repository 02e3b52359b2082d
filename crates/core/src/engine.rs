//! Board engine - owns the grid, the selection and the clear rules
//!
//! Input reports pointer gestures; the engine validates them, keeps the selection path,
//! and resolves a finished path into a clear. Everything a renderer needs comes back as
//! snapshots and [`ClearResult`]s; nothing outside the engine mutates the grid.

use crate::error::BoardError;
use crate::grid::Grid;
use crate::layout::{BoardLayout, Vec2};
use crate::resolve::{clear_set, collapse_and_refill, ClearResult};
use crate::rng::{ColorSource, SimpleRng};
use crate::selection::SelectionPath;
use crate::snapshot::BoardSnapshot;
use crate::types::{CellIndex, ColorId, PointerEvent};

/// What a pointer event did to the board.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// A new path started with this tint.
    Started(ColorId),
    /// A selection was already open; nothing changed.
    Refused,
    /// The path grew by one cell.
    Extended,
    /// The cell could not be appended; nothing changed.
    Rejected,
    /// The selection ended (possibly as a no-op).
    Ended(ClearResult),
}

#[derive(Debug, Clone)]
pub struct BoardEngine<R: ColorSource = SimpleRng> {
    grid: Grid,
    path: SelectionPath,
    rng: R,
    layout: BoardLayout,
    board_id: u32,
    cleared_total: u32,
}

impl BoardEngine<SimpleRng> {
    /// Engine with the built-in LCG.
    pub fn seeded(rows: u16, cols: u16, num_colors: u8, seed: u32) -> Result<Self, BoardError> {
        Self::new(rows, cols, num_colors, SimpleRng::new(seed))
    }
}

impl<R: ColorSource> BoardEngine<R> {
    /// Create a board of random dots.
    pub fn new(rows: u16, cols: u16, num_colors: u8, mut rng: R) -> Result<Self, BoardError> {
        let grid = Grid::random(rows, cols, num_colors, &mut rng)?;
        Ok(Self {
            grid,
            path: SelectionPath::new(),
            rng,
            layout: BoardLayout::default(),
            board_id: 1,
            cleared_total: 0,
        })
    }

    /// Start from a known grid (refills still come from `rng`).
    pub fn from_grid(grid: Grid, rng: R) -> Self {
        Self {
            grid,
            path: SelectionPath::new(),
            rng,
            layout: BoardLayout::default(),
            board_id: 1,
            cleared_total: 0,
        }
    }

    pub fn with_layout(mut self, layout: BoardLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &SelectionPath {
        &self.path
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn rows(&self) -> u16 {
        self.grid.rows()
    }

    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    pub fn num_colors(&self) -> u8 {
        self.grid.num_colors()
    }

    pub fn board_id(&self) -> u32 {
        self.board_id
    }

    pub fn cleared_total(&self) -> u32 {
        self.cleared_total
    }

    pub fn color(&self, cell: CellIndex) -> Result<ColorId, BoardError> {
        self.grid.check(cell)?;
        Ok(self.grid.cells()[cell])
    }

    /// Resting world position of a cell.
    pub fn position(&self, cell: CellIndex) -> Result<Vec2, BoardError> {
        self.grid.check(cell)?;
        Ok(self.layout.position(self.rows(), self.cols(), cell))
    }

    /// World positions of the path, in selection order (the line's nodes).
    pub fn path_positions(&self) -> Vec<Vec2> {
        let (rows, cols) = (self.rows(), self.cols());
        self.path
            .cells()
            .iter()
            .map(|&c| self.layout.position(rows, cols, c))
            .collect()
    }

    /// Replace the board with a fresh random one.
    ///
    /// On error the current board and selection are left untouched.
    pub fn initialize(&mut self, rows: u16, cols: u16, num_colors: u8) -> Result<(), BoardError> {
        let grid = Grid::random(rows, cols, num_colors, &mut self.rng)?;
        self.grid = grid;
        self.path.clear();
        self.board_id = self.board_id.wrapping_add(1);
        Ok(())
    }

    /// New dimensions, same number of colors.
    pub fn resize(&mut self, rows: u16, cols: u16) -> Result<(), BoardError> {
        self.initialize(rows, cols, self.grid.num_colors())
    }

    /// Drop the selection and re-roll every dot.
    pub fn reset(&mut self) {
        self.path.clear();
        self.grid.randomize(&mut self.rng);
        self.board_id = self.board_id.wrapping_add(1);
    }

    /// Open a selection on `cell`.
    ///
    /// Returns the path color, or `None` when a selection is already open.
    pub fn begin_selection(&mut self, cell: CellIndex) -> Result<Option<ColorId>, BoardError> {
        self.grid.check(cell)?;
        if self.path.is_active() {
            return Ok(None);
        }
        let color = self.grid.cells()[cell];
        self.path.start(cell, color);
        Ok(Some(color))
    }

    /// Whether `cell` would be accepted as the next path step.
    pub fn can_extend(&self, cell: CellIndex) -> Result<bool, BoardError> {
        self.grid.check(cell)?;
        let Some(last) = self.path.last() else {
            return Ok(false);
        };

        // Stepping straight back is refused once the path has three cells. A two-cell path
        // may return to its start, which is how a 2x2 square closes.
        if self.path.len() > 2 && self.path.second_last() == Some(cell) {
            return Ok(false);
        }

        if !self.grid.is_adjacent(last, cell) {
            return Ok(false);
        }

        Ok(self.grid.cells()[cell] == self.grid.cells()[last])
    }

    /// Append `cell` to the path if it is a legal step.
    pub fn extend_selection(&mut self, cell: CellIndex) -> Result<bool, BoardError> {
        if !self.can_extend(cell)? {
            return Ok(false);
        }
        self.path.push(cell);
        Ok(true)
    }

    /// Close the selection, clearing and refilling when the path is long enough.
    ///
    /// The path is always discarded.
    pub fn end_selection(&mut self) -> ClearResult {
        let (cleared, looped) = clear_set(&self.grid, &self.path);
        let color = self.path.color();
        self.path.clear();

        if cleared.is_empty() {
            return ClearResult::noop(self.snapshot());
        }

        let transitions =
            collapse_and_refill(&mut self.grid, &cleared, &mut self.rng, &self.layout);
        self.board_id = self.board_id.wrapping_add(1);
        self.cleared_total = self.cleared_total.saturating_add(cleared.len() as u32);

        ClearResult {
            cleared,
            looped,
            color,
            transitions,
            snapshot: self.snapshot(),
        }
    }

    /// Route a pointer gesture to begin/extend/end.
    pub fn apply_pointer(&mut self, event: PointerEvent) -> Result<PointerOutcome, BoardError> {
        Ok(match event {
            PointerEvent::Down(cell) => match self.begin_selection(cell)? {
                Some(color) => PointerOutcome::Started(color),
                None => PointerOutcome::Refused,
            },
            PointerEvent::Enter(cell) => {
                if self.extend_selection(cell)? {
                    PointerOutcome::Extended
                } else {
                    PointerOutcome::Rejected
                }
            }
            PointerEvent::Up => PointerOutcome::Ended(self.end_selection()),
        })
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.grid, &self.path, self.board_id, self.cleared_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedColors;

    const R: ColorId = 0;
    const B: ColorId = 1;

    /// Bottom row first: [R R B / B R B / R B R].
    fn scenario_engine() -> BoardEngine<ScriptedColors> {
        let grid = Grid::from_colors(3, 3, 2, vec![R, R, B, B, R, B, R, B, R]).unwrap();
        BoardEngine::from_grid(grid, ScriptedColors::new(vec![B, R]))
    }

    #[test]
    fn begin_returns_color_and_refuses_second_start() {
        let mut e = scenario_engine();
        assert_eq!(e.begin_selection(2), Ok(Some(B)));
        assert_eq!(e.begin_selection(0), Ok(None));
        assert_eq!(e.selection().cells(), &[2]);
    }

    #[test]
    fn extend_requires_active_selection() {
        let mut e = scenario_engine();
        assert_eq!(e.can_extend(1), Ok(false));
        assert_eq!(e.extend_selection(1), Ok(false));
        assert!(e.selection().is_empty());
    }

    #[test]
    fn extend_checks_adjacency_and_color() {
        let mut e = scenario_engine();
        e.begin_selection(0).unwrap();
        // Diagonal.
        assert_eq!(e.extend_selection(4), Ok(false));
        // Above, wrong color.
        assert_eq!(e.extend_selection(3), Ok(false));
        assert_eq!(e.extend_selection(1), Ok(true));
        assert_eq!(e.extend_selection(4), Ok(true));
        assert_eq!(e.selection().cells(), &[0, 1, 4]);
    }

    #[test]
    fn row_wrap_is_not_adjacent() {
        // 2 (end of bottom row) and 3 (start of middle row) share a color here.
        let grid = Grid::from_colors(3, 3, 2, vec![0, 0, 1, 1, 0, 0, 0, 0, 0]).unwrap();
        let mut e = BoardEngine::from_grid(grid, ScriptedColors::new(vec![0]));
        e.begin_selection(2).unwrap();
        assert_eq!(e.extend_selection(3), Ok(false));
    }

    #[test]
    fn two_cell_path_may_return_to_start() {
        let grid = Grid::from_colors(2, 2, 1, vec![0; 4]).unwrap();
        let mut e = BoardEngine::from_grid(grid, ScriptedColors::new(vec![0]));
        e.begin_selection(0).unwrap();
        assert_eq!(e.extend_selection(1), Ok(true));
        assert_eq!(e.extend_selection(0), Ok(true));
        // Now three long: stepping back onto 1 is a backtrack.
        assert_eq!(e.extend_selection(1), Ok(false));
        assert_eq!(e.selection().cells(), &[0, 1, 0]);
    }

    #[test]
    fn square_closes_into_loop() {
        let grid = Grid::from_colors(2, 2, 1, vec![0; 4]).unwrap();
        let mut e = BoardEngine::from_grid(grid, ScriptedColors::new(vec![0]));
        e.begin_selection(0).unwrap();
        for c in [1, 3, 2, 0] {
            assert_eq!(e.extend_selection(c), Ok(true), "step to {}", c);
        }
        let r = e.end_selection();
        assert!(r.looped);
        assert_eq!(r.cleared, vec![3, 2, 1, 0]);
    }

    #[test]
    fn out_of_range_cells_are_errors() {
        let mut e = scenario_engine();
        let err = BoardError::CellOutOfBounds { index: 9, len: 9 };
        assert_eq!(e.begin_selection(9), Err(err));
        assert_eq!(e.can_extend(9), Err(err));
        assert_eq!(e.extend_selection(9), Err(err));
        assert_eq!(e.color(9), Err(err));
    }

    #[test]
    fn single_dot_path_is_noop() {
        let mut e = scenario_engine();
        let before = e.snapshot();
        e.begin_selection(4).unwrap();
        let r = e.end_selection();
        assert!(r.is_noop());
        assert_eq!(r.snapshot.cells, before.cells);
        assert_eq!(r.snapshot.board_id, before.board_id);
        assert!(!e.selection().is_active());
    }

    #[test]
    fn end_twice_is_noop_second_time() {
        let mut e = scenario_engine();
        e.begin_selection(0).unwrap();
        e.extend_selection(1).unwrap();
        assert!(!e.end_selection().is_noop());
        let after = e.snapshot();
        let r = e.end_selection();
        assert!(r.is_noop());
        assert_eq!(r.snapshot, after);
    }

    #[test]
    fn failed_initialize_keeps_board() {
        let mut e = scenario_engine();
        let before = e.snapshot();
        assert_eq!(
            e.initialize(0, 3, 2),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(e.resize(3, 0), Err(BoardError::InvalidDimensions { rows: 3, cols: 0 }));
        assert_eq!(e.initialize(3, 3, 0), Err(BoardError::NoColors));
        assert_eq!(e.snapshot(), before);
    }

    #[test]
    fn reset_clears_selection_and_keeps_shape() {
        let mut e = BoardEngine::seeded(4, 5, 3, 11).unwrap();
        e.begin_selection(0).unwrap();
        let id = e.board_id();
        e.reset();
        assert!(!e.selection().is_active());
        assert_eq!((e.rows(), e.cols(), e.num_colors()), (4, 5, 3));
        assert_eq!(e.grid().len(), 20);
        assert_eq!(e.board_id(), id + 1);
        assert!(e.grid().cells().iter().all(|&c| c < 3));
    }

    #[test]
    fn reset_rerolls_every_cell_from_the_color_source() {
        let grid = Grid::from_colors(2, 2, 3, vec![0, 0, 0, 0]).unwrap();
        let mut e = BoardEngine::from_grid(grid, ScriptedColors::new(vec![1, 2, 0, 5]));
        e.reset();
        // Drawn in index order; 5 wraps to 2 with three colors.
        assert_eq!(e.grid().cells(), &[1, 2, 0, 2]);
        assert!(e.grid().cells().iter().all(|&c| c < e.num_colors()));
    }

    #[test]
    fn pointer_events_map_to_operations() {
        let mut e = scenario_engine();
        assert_eq!(
            e.apply_pointer(PointerEvent::Down(0)),
            Ok(PointerOutcome::Started(R))
        );
        assert_eq!(
            e.apply_pointer(PointerEvent::Down(1)),
            Ok(PointerOutcome::Refused)
        );
        assert_eq!(
            e.apply_pointer(PointerEvent::Enter(3)),
            Ok(PointerOutcome::Rejected)
        );
        assert_eq!(
            e.apply_pointer(PointerEvent::Enter(1)),
            Ok(PointerOutcome::Extended)
        );
        match e.apply_pointer(PointerEvent::Up) {
            Ok(PointerOutcome::Ended(r)) => assert_eq!(r.cleared, vec![1, 0]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn path_positions_follow_selection() {
        let mut e = scenario_engine();
        e.begin_selection(0).unwrap();
        e.extend_selection(1).unwrap();
        let pts = e.path_positions();
        assert_eq!(pts, vec![e.position(0).unwrap(), e.position(1).unwrap()]);
    }
}

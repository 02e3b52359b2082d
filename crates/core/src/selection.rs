//! The in-progress selection path.

use crate::types::{CellIndex, ColorId};

/// Cells connected by the current gesture, in selection order.
///
/// Indices may repeat: closing a loop re-adds a cell that is already on the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPath {
    cells: Vec<CellIndex>,
    color: Option<ColorId>,
}

impl SelectionPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start(&mut self, cell: CellIndex, color: ColorId) {
        self.cells.clear();
        self.cells.push(cell);
        self.color = Some(color);
    }

    pub(crate) fn push(&mut self, cell: CellIndex) {
        self.cells.push(cell);
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
        self.color = None;
    }

    pub fn is_active(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Color of the first dot (the line tint).
    pub fn color(&self) -> Option<ColorId> {
        self.color
    }

    pub fn first(&self) -> Option<CellIndex> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<CellIndex> {
        self.cells.last().copied()
    }

    /// The step before the last one.
    pub fn second_last(&self) -> Option<CellIndex> {
        self.cells.len().checked_sub(2).map(|i| self.cells[i])
    }

    /// True when any cell appears more than once.
    pub fn has_loop(&self) -> bool {
        let mut seen = self.cells.clone();
        seen.sort_unstable();
        seen.windows(2).any(|w| w[0] == w[1])
    }

    /// Path cells without repeats, in first-visit order.
    pub fn distinct(&self) -> Vec<CellIndex> {
        let mut out: Vec<CellIndex> = Vec::with_capacity(self.cells.len());
        for &c in &self.cells {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_inactive() {
        let p = SelectionPath::new();
        assert!(!p.is_active());
        assert_eq!(p.last(), None);
        assert_eq!(p.second_last(), None);
        assert_eq!(p.color(), None);
    }

    #[test]
    fn tracks_tail() {
        let mut p = SelectionPath::new();
        p.start(4, 2);
        assert_eq!(p.second_last(), None);
        p.push(5);
        p.push(8);
        assert_eq!(p.last(), Some(8));
        assert_eq!(p.second_last(), Some(5));
        assert_eq!(p.first(), Some(4));
        assert_eq!(p.color(), Some(2));
    }

    #[test]
    fn detects_loop() {
        let mut p = SelectionPath::new();
        p.start(0, 1);
        p.push(1);
        p.push(4);
        p.push(3);
        assert!(!p.has_loop());
        p.push(0);
        assert!(p.has_loop());
        assert_eq!(p.distinct(), vec![0, 1, 4, 3]);
    }

    #[test]
    fn clear_resets_color() {
        let mut p = SelectionPath::new();
        p.start(2, 3);
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.color(), None);
    }
}

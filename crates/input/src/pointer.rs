//! Mouse gesture tracking.
//!
//! Terminals report drags as a stream of positions. The board only cares when the pointer
//! crosses onto a different dot, so the tracker remembers which cell it is over and emits
//! [`PointerEvent::Enter`] once per entry.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{CellIndex, PointerEvent};

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pressed: bool,
    hover: Option<CellIndex>,
    cursor: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one mouse event; `hit` maps terminal (column, row) to the dot under it.
    pub fn handle_mouse(
        &mut self,
        event: MouseEvent,
        hit: impl Fn(u16, u16) -> Option<CellIndex>,
    ) -> Option<PointerEvent> {
        let pos = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = true;
                self.cursor = Some(pos);
                self.hover = hit(pos.0, pos.1);
                self.hover.map(PointerEvent::Down)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // Drags of a gesture that was cancelled (or never started here) are ignored.
                if !self.pressed {
                    return None;
                }
                self.cursor = Some(pos);
                let cell = hit(pos.0, pos.1);
                if cell == self.hover {
                    return None;
                }
                self.hover = cell;
                cell.map(PointerEvent::Enter)
            }
            MouseEventKind::Moved => {
                self.hover = hit(pos.0, pos.1);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.pressed = false;
                self.cursor = None;
                Some(PointerEvent::Up)
            }
            _ => None,
        }
    }

    /// Forget any gesture in progress (e.g. after the board was resized).
    pub fn cancel(&mut self) {
        self.pressed = false;
        self.hover = None;
        self.cursor = None;
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn hover(&self) -> Option<CellIndex> {
        self.hover
    }

    /// Terminal position of the pointer while a button is held.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }
}

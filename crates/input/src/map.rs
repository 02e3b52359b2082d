//! Key mapping from terminal events to board commands.

use crate::types::BoardCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to board commands.
pub fn handle_key_event(key: KeyEvent) -> Option<BoardCommand> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(BoardCommand::Reset),

        // Rows
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Some(BoardCommand::GrowRows),
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
            Some(BoardCommand::ShrinkRows)
        }

        // Columns
        KeyCode::Char('>') | KeyCode::Char('.') | KeyCode::Right => Some(BoardCommand::GrowCols),
        KeyCode::Char('<') | KeyCode::Char(',') | KeyCode::Left => {
            Some(BoardCommand::ShrinkCols)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

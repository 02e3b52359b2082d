use std::fmt;

use crate::types::{CellIndex, ColorId};

/// Errors reported by [`BoardEngine`](crate::engine::BoardEngine).
///
/// Rejected extensions are not errors; they come back as `Ok(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    InvalidDimensions { rows: u16, cols: u16 },
    NoColors,
    CellOutOfBounds { index: CellIndex, len: usize },
    CellCountMismatch { expected: usize, got: usize },
    ColorOutOfRange { color: ColorId, num_colors: u8 },
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::InvalidDimensions { .. }
            | BoardError::NoColors
            | BoardError::CellCountMismatch { .. }
            | BoardError::ColorOutOfRange { .. } => "invalid_config",
            BoardError::CellOutOfBounds { .. } => "out_of_bounds",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BoardError::InvalidDimensions { .. } => "board rows and columns must be positive",
            BoardError::NoColors => "at least one color is required",
            BoardError::CellOutOfBounds { .. } => "cell index is outside the board",
            BoardError::CellCountMismatch { .. } => "cell count does not match rows * cols",
            BoardError::ColorOutOfRange { .. } => "color is not in the palette",
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BoardError::InvalidDimensions { rows, cols } => {
                write!(f, "{}: {} ({}x{})", self.code(), self.message(), rows, cols)
            }
            BoardError::NoColors => write!(f, "{}: {}", self.code(), self.message()),
            BoardError::CellOutOfBounds { index, len } => {
                write!(f, "{}: {} ({} >= {})", self.code(), self.message(), index, len)
            }
            BoardError::CellCountMismatch { expected, got } => {
                write!(f, "{}: {} (expected {}, got {})", self.code(), self.message(), expected, got)
            }
            BoardError::ColorOutOfRange { color, num_colors } => {
                write!(f, "{}: {} ({} >= {})", self.code(), self.message(), color, num_colors)
            }
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_group_configuration_errors() {
        assert_eq!(BoardError::NoColors.code(), "invalid_config");
        assert_eq!(
            BoardError::InvalidDimensions { rows: 0, cols: 3 }.code(),
            "invalid_config"
        );
        assert_eq!(
            BoardError::CellOutOfBounds { index: 9, len: 9 }.code(),
            "out_of_bounds"
        );
    }

    #[test]
    fn display_includes_context() {
        let e = BoardError::CellOutOfBounds { index: 12, len: 9 };
        assert_eq!(
            e.to_string(),
            "out_of_bounds: cell index is outside the board (12 >= 9)"
        );
        let e = BoardError::InvalidDimensions { rows: 0, cols: 4 };
        assert!(e.to_string().ends_with("(0x4)"));
    }
}

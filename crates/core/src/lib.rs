//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else. It has **no dependencies** on
//! UI, terminal, or I/O, making it:
//!
//! - **Deterministic**: every color comes from an injectable [`ColorSource`]
//! - **Testable**: boards can be built from explicit colors and refills scripted
//! - **Portable**: the same engine drives the terminal game, tests and benchmarks
//!
//! # Module Structure
//!
//! - [`grid`]: flat row-major color storage and adjacency
//! - [`selection`]: the path of connected dots
//! - [`engine`]: [`BoardEngine`], the single owner of grid and selection
//! - [`resolve`]: clear-set computation, column collapse and refill
//! - [`layout`]: world positions used by presentation
//! - [`rng`]: seeded LCG and scripted color sources
//! - [`snapshot`]: read-only board copies for observers
//!
//! # Game Rules
//!
//! - **Connect**: a path steps left, right, up or down onto a dot of the same color
//! - **No stepping back**: once the path has three dots, the previous dot cannot be re-added
//! - **Clear**: releasing a path of two or more dots removes them
//! - **Loop bonus**: a path that revisits any dot removes every dot of that color
//! - **Gravity**: dots above a hole slide down; the top of the column gets a fresh dot
//!
//! # Example
//!
//! ```
//! use tui_dots_core::{BoardEngine, Grid, ScriptedColors};
//!
//! // Bottom row first: two red dots (0) next to each other.
//! let grid = Grid::from_colors(2, 2, 2, vec![0, 0, 1, 1]).unwrap();
//! let mut engine = BoardEngine::from_grid(grid, ScriptedColors::new(vec![1, 0]));
//!
//! assert_eq!(engine.begin_selection(0).unwrap(), Some(0));
//! assert!(engine.extend_selection(1).unwrap());
//!
//! let result = engine.end_selection();
//! assert_eq!(result.cleared, vec![1, 0]);
//! // The blue dots fell to the bottom row, fresh dots were added on top.
//! assert_eq!(engine.grid().cells(), &[1, 1, 0, 1]);
//! ```

pub mod engine;
pub mod error;
pub mod grid;
pub mod layout;
pub mod resolve;
pub mod rng;
pub mod selection;
pub mod snapshot;

pub use tui_dots_types as types;

// Re-export commonly used types for convenience
pub use engine::{BoardEngine, PointerOutcome};
pub use error::BoardError;
pub use grid::Grid;
pub use layout::{BoardLayout, Vec2};
pub use resolve::{CellTransition, ClearResult, TransitionSource};
pub use rng::{ColorSource, ScriptedColors, SimpleRng};
pub use selection::SelectionPath;
pub use snapshot::{board_hash, BoardSnapshot};

//! Domain layer: pure game logic types and helpers.

pub mod board;
pub mod coords;
pub mod preset;
pub mod round;
pub mod scoring;

pub use board::{Cell, Grid};
pub use coords::{board_side, column_letter, range_for, CellRange};
pub use preset::PresetTable;
pub use round::RoundState;
pub use scoring::{PlayerScore, PlayerTotal, ResultRow};

//! Orchestration over the repositories.

pub mod board_locks;
pub mod game;
pub mod scores;

pub use board_locks::BoardLocks;
pub use game::GameService;
pub use scores::ScoreService;

//! Worksheet-level reads and writes, one module per kind of sheet.
//!
//! Functions here are thin: they know which worksheet and range hold a piece
//! of game state and translate between cells and domain types. Lock handling
//! and skip-on-missing policy live in the services.

pub mod boards;
pub mod presets;
pub mod results;
pub mod rounds;

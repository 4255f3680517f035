//! Infrastructure layer - store connection and state management.

pub mod state;

//! Round progression.
//!
//! The round counter is the only piece of shared mutable game state. It is
//! stored as a plain integer: 0 means not started, 1–9 are playable rounds and
//! anything above 9 is the terminal "clear" state.

use serde::{Serialize, Serializer};

use crate::domain::coords::board_side;

/// Last playable round (board side 10).
pub const FINAL_ROUND: u8 = 9;

/// Stored value written when the game is cleared.
pub const CLEAR_MARKER: i64 = FINAL_ROUND as i64 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    NotStarted,
    Active(u8),
    Clear,
}

impl RoundState {
    /// Interpret a raw control-cell value.
    ///
    /// Missing, empty, non-numeric or negative values read as `NotStarted`.
    pub fn from_cell(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::NotStarted;
        };
        match raw.trim().parse::<i64>() {
            Ok(v) => Self::from_stored(v),
            Err(_) => Self::NotStarted,
        }
    }

    pub fn from_stored(value: i64) -> Self {
        match value {
            v if v <= 0 => Self::NotStarted,
            v if v <= FINAL_ROUND as i64 => Self::Active(v as u8),
            _ => Self::Clear,
        }
    }

    /// Integer form written back to the control cell.
    pub fn stored_value(self) -> i64 {
        match self {
            Self::NotStarted => 0,
            Self::Active(r) => r as i64,
            Self::Clear => CLEAR_MARKER,
        }
    }

    /// Next state. Advancing past the final round clears the game; a cleared
    /// game stays cleared until an explicit reset.
    pub fn advance(self) -> Self {
        match self {
            Self::NotStarted => Self::Active(1),
            Self::Active(r) if r < FINAL_ROUND => Self::Active(r + 1),
            Self::Active(_) | Self::Clear => Self::Clear,
        }
    }

    /// Board side for an active round.
    pub fn board_side(self) -> Option<u8> {
        match self {
            Self::Active(r) => Some(board_side(r)),
            _ => None,
        }
    }

    pub fn active_round(self) -> Option<u8> {
        match self {
            Self::Active(r) => Some(r),
            _ => None,
        }
    }
}

/// Integer for not-started / active rounds, `"clear"` for the terminal state.
impl Serialize for RoundState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Clear => serializer.serialize_str("clear"),
            other => serializer.serialize_i64(other.stored_value()),
        }
    }
}

//! Player board cells and the grid helpers built on them.

use crate::domain::coords::MAX_BOARD_SIDE;

/// Rectangular block of cell strings as read from or written to a worksheet.
///
/// Rows read back from the store may be ragged or shorter than requested;
/// index with [`cell_at`] rather than directly.
pub type Grid = Vec<Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Unset,
    Closed,
    PlayerOpened,
    AdminOpened,
}

impl Cell {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "0" => Self::Closed,
            "1" => Self::PlayerOpened,
            "2" => Self::AdminOpened,
            _ => Self::Unset,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Closed => "0",
            Self::PlayerOpened => "1",
            Self::AdminOpened => "2",
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::PlayerOpened | Self::AdminOpened)
    }
}

/// Bound-checked lookup of a 0-based cell.
pub fn cell_at(grid: &Grid, row: usize, col: usize) -> Option<&str> {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
}

/// Count opened cells inside the `n`×`n` active region only.
pub fn count_opened(grid: &Grid, n: usize) -> u32 {
    let mut opened = 0;
    for row in 0..n {
        for col in 0..n {
            if cell_at(grid, row, col).is_some_and(|v| Cell::parse(v).is_open()) {
                opened += 1;
            }
        }
    }
    opened
}

/// Build the full fixed-size board for a fresh round.
///
/// Inside the `n`×`n` region a cell is admin-opened where the preset flag is
/// `1` and closed otherwise. Everything outside the region is blank so the
/// write also clears leftovers from larger rounds.
pub fn from_preset(preset: &Grid, n: usize) -> Grid {
    let side = MAX_BOARD_SIDE as usize;
    (0..side)
        .map(|row| {
            (0..side)
                .map(|col| {
                    let cell = if row >= n || col >= n {
                        Cell::Unset
                    } else if cell_at(preset, row, col).is_some_and(|v| v.trim() == "1") {
                        Cell::AdminOpened
                    } else {
                        Cell::Closed
                    };
                    cell.as_str().to_string()
                })
                .collect()
        })
        .collect()
}

/// Square `n`×`n` copy of a possibly ragged grid, padding with blanks.
pub fn padded(grid: &Grid, n: usize) -> Grid {
    (0..n)
        .map(|row| {
            (0..n)
                .map(|col| cell_at(grid, row, col).unwrap_or_default().to_string())
                .collect()
        })
        .collect()
}

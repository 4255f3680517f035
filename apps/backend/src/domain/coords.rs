//! A1-notation arithmetic for worksheet ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the fixed board block every player worksheet reserves.
pub const MAX_BOARD_SIDE: u32 = 10;

/// Convert a 1-based column index to spreadsheet letters (1 → A, 27 → AA).
///
/// Column 0 has no letter form and yields the empty string.
pub fn column_letter(n: u32) -> String {
    let mut n = n;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Board side length for a round: `round + 1`.
pub fn board_side(round: u8) -> u8 {
    round.saturating_add(1)
}

/// Range covering rows 1..=n and columns 1..=n.
pub fn range_for(n: u32) -> CellRange {
    CellRange::new(1, 1, n, n)
}

/// Inclusive rectangle of 1-based (row, col) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl CellRange {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// Single-cell range.
    pub fn cell(row: u32, col: u32) -> Self {
        Self::new(row, col, row, col)
    }

    /// The full fixed-size board block (`A1:J10`).
    pub fn full_board() -> Self {
        range_for(MAX_BOARD_SIDE)
    }

    pub fn rows(&self) -> u32 {
        self.end_row.saturating_sub(self.start_row) + 1
    }

    pub fn cols(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col) + 1
    }

    pub fn is_single_cell(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }

    /// Parse plain A1 notation (`B1`, `A2:B3`). Sheet-qualified ranges are not accepted.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.split_once(':') {
            Some((start, end)) => {
                let (start_row, start_col) = parse_cell(start)?;
                let (end_row, end_col) = parse_cell(end)?;
                if end_row < start_row || end_col < start_col {
                    return None;
                }
                Some(Self::new(start_row, start_col, end_row, end_col))
            }
            None => {
                let (row, col) = parse_cell(input)?;
                Some(Self::cell(row, col))
            }
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = format!("{}{}", column_letter(self.start_col), self.start_row);
        if self.is_single_cell() {
            write!(f, "{start}")
        } else {
            write!(
                f,
                "{start}:{}{}",
                column_letter(self.end_col),
                self.end_row
            )
        }
    }
}

fn parse_cell(cell: &str) -> Option<(u32, u32)> {
    let split = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        let v = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col.checked_mul(26)?.checked_add(v)?;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}

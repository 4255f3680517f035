//! Per-round preset regions on the presets worksheet.
//!
//! Each round's template sits in its own block starting at row 2. Blocks are
//! laid out left to right with no gaps, so round `r` (side `n = r + 1`) starts
//! right after the widths of all earlier rounds.

use crate::domain::coords::{board_side, CellRange};
use crate::domain::round::FINAL_ROUND;

/// Static lookup of preset ranges, index 0 is round 1.
pub const DEFAULT_PRESET_RANGES: [&str; FINAL_ROUND as usize] = [
    "A2:B3", "C2:E4", "F2:I5", "J2:N6", "O2:T7", "U2:AA8", "AB2:AI9", "AJ2:AR10", "AS2:BB11",
];

/// Validated table of preset ranges for rounds 1..=9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTable {
    ranges: Vec<CellRange>,
}

impl PresetTable {
    /// Build from A1 strings. Each range must be exactly `n`×`n` for its round.
    pub fn from_ranges<S: AsRef<str>>(ranges: &[S]) -> Result<Self, String> {
        if ranges.len() != FINAL_ROUND as usize {
            return Err(format!(
                "expected {} preset ranges, got {}",
                FINAL_ROUND,
                ranges.len()
            ));
        }
        let mut parsed = Vec::with_capacity(ranges.len());
        for (idx, raw) in ranges.iter().enumerate() {
            let raw = raw.as_ref();
            let range = CellRange::parse(raw)
                .ok_or_else(|| format!("invalid preset range '{raw}'"))?;
            let n = board_side(idx as u8 + 1) as u32;
            if range.rows() != n || range.cols() != n {
                return Err(format!(
                    "preset range '{raw}' for round {} must be {n}x{n}",
                    idx + 1
                ));
            }
            parsed.push(range);
        }
        Ok(Self { ranges: parsed })
    }

    /// Range for an active round, `None` outside 1..=9.
    pub fn range_for_round(&self, round: u8) -> Option<CellRange> {
        if round == 0 {
            return None;
        }
        self.ranges.get(round as usize - 1).copied()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        let ranges = DEFAULT_PRESET_RANGES
            .iter()
            .filter_map(|r| CellRange::parse(r))
            .collect();
        Self { ranges }
    }
}

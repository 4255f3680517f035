//! Game layout: roster, worksheet names, per-round assets and presets.

use super::{list_var, optional_var};
use crate::domain::preset::PresetTable;
use crate::domain::round::FINAL_ROUND;
use crate::error::AppError;

pub const CONTROL_SHEET: &str = "AdminControl";
pub const PRESETS_SHEET: &str = "AdminPresets";
pub const RESULTS_SHEET: &str = "Results";

/// Player id that addresses the designated admin board.
pub const ADMIN_ALIAS: &str = "Admin";
/// Player id that short-circuits `/status` to a liveness reply.
pub const PING_PLAYER: &str = "ping";

/// Control cell holding the current round (row 1, column 2 = `B1`).
pub const ROUND_CELL: (u32, u32) = (1, 2);

pub const DEFAULT_PLAYER_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Player worksheet titles in roster order (also the ranking tie-break).
    pub players: Vec<String>,
    /// Board shown and edited when a request names the admin alias.
    pub admin_board: String,
    /// Background asset id per round, index 0 is round 1.
    pub backgrounds: Vec<String>,
    pub presets: PresetTable,
    pub control_sheet: String,
    pub presets_sheet: String,
    pub results_sheet: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let players: Vec<String> = (1..=DEFAULT_PLAYER_COUNT)
            .map(|i| format!("Player{i}"))
            .collect();
        Self {
            admin_board: players[0].clone(),
            players,
            backgrounds: default_backgrounds(),
            presets: PresetTable::default(),
            control_sheet: CONTROL_SHEET.to_string(),
            presets_sheet: PRESETS_SHEET.to_string(),
            results_sheet: RESULTS_SHEET.to_string(),
        }
    }
}

fn default_backgrounds() -> Vec<String> {
    (1..=FINAL_ROUND)
        .map(|r| format!("images/round{r}.jpg"))
        .collect()
}

impl GameConfig {
    /// Overlay `GAME_*` variables on the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut cfg = Self::default();

        if let Some(players) = list_var("GAME_PLAYERS") {
            if players.is_empty() {
                return Err(AppError::config("GAME_PLAYERS must name at least one player"));
            }
            cfg.admin_board = players[0].clone();
            cfg.players = players;
        }
        if let Some(admin) = optional_var("GAME_ADMIN_BOARD") {
            cfg.admin_board = admin;
        }
        if let Some(backgrounds) = list_var("GAME_BACKGROUNDS") {
            if backgrounds.len() != FINAL_ROUND as usize {
                return Err(AppError::config(format!(
                    "GAME_BACKGROUNDS must list {FINAL_ROUND} entries, got {}",
                    backgrounds.len()
                )));
            }
            cfg.backgrounds = backgrounds;
        }
        if let Some(ranges) = list_var("GAME_PRESET_RANGES") {
            cfg.presets = PresetTable::from_ranges(&ranges)
                .map_err(|e| AppError::config(format!("GAME_PRESET_RANGES: {e}")))?;
        }
        Ok(cfg)
    }

    /// Worksheet for a requested player id, mapping the admin alias.
    pub fn board_for<'a>(&'a self, player: &'a str) -> &'a str {
        if player == ADMIN_ALIAS {
            &self.admin_board
        } else {
            player
        }
    }

    /// Roster boards and the admin board; the only boards a round resets.
    pub fn is_board(&self, board: &str) -> bool {
        board == self.admin_board || self.players.iter().any(|p| p == board)
    }

    pub fn background_for(&self, round: u8) -> Option<&str> {
        if round == 0 {
            return None;
        }
        self.backgrounds.get(round as usize - 1).map(String::as_str)
    }
}

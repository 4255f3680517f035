//! Seeded in-memory spreadsheets for tests.

use std::sync::Arc;

use panel_backend::config::GameConfig;
use panel_backend::domain::{CellRange, Grid};
use panel_backend::infra::state::seeded_memory_store;
use panel_backend::state::app_state::AppState;
use panel_backend::store::{MemoryStore, SharedStore, SheetStore};

pub fn grid(rows: &[&[&str]]) -> Grid {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// Game config plus a memory store holding every worksheet it names.
pub struct GameFixture {
    pub store: Arc<MemoryStore>,
    pub game: GameConfig,
}

impl GameFixture {
    pub fn new() -> Self {
        Self::with_game(GameConfig::default())
    }

    pub fn with_players(players: &[&str]) -> Self {
        let players: Vec<String> = players.iter().map(|p| p.to_string()).collect();
        Self::with_game(GameConfig {
            admin_board: players[0].clone(),
            players,
            ..GameConfig::default()
        })
    }

    pub fn with_game(game: GameConfig) -> Self {
        Self {
            store: Arc::new(seeded_memory_store(&game)),
            game,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.store.clone() as SharedStore, self.game.clone())
    }

    pub async fn set_round(&self, raw: &str) {
        self.store
            .update_cell(&self.game.control_sheet, 1, 2, raw)
            .await
            .unwrap();
    }

    pub async fn round_cell(&self) -> Option<String> {
        self.store
            .get_cell(&self.game.control_sheet, 1, 2)
            .await
            .unwrap()
    }

    /// Write `rows` at the top-left of a board.
    pub async fn fill_board(&self, player: &str, rows: &[&[&str]]) {
        let values = grid(rows);
        let width = values.iter().map(Vec::len).max().unwrap_or(1).max(1) as u32;
        let height = values.len().max(1) as u32;
        self.store
            .update(player, CellRange::new(1, 1, height, width), &values)
            .await
            .unwrap();
    }

    /// Write the preset block for `round` into the presets worksheet.
    pub async fn set_preset(&self, round: u8, rows: &[&[&str]]) {
        let range = self.game.presets.range_for_round(round).unwrap();
        self.store
            .update(&self.game.presets_sheet, range, &grid(rows))
            .await
            .unwrap();
    }

    /// Full fixed-size block of a board, trimmed like the hosted sheet.
    pub async fn board(&self, player: &str) -> Grid {
        self.store
            .get(player, CellRange::full_board())
            .await
            .unwrap()
    }

    pub async fn results(&self) -> Grid {
        self.store
            .get_all_values(&self.game.results_sheet)
            .await
            .unwrap()
    }
}

impl Default for GameFixture {
    fn default() -> Self {
        Self::new()
    }
}

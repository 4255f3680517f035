//! Round flow and panel opening.

use serde::Serialize;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard};
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::domain::board::padded;
use crate::domain::{Cell, Grid, RoundState};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::{boards, presets, results, rounds};
use crate::services::board_locks::BoardLocks;
use crate::store::SheetStore;

/// Board snapshot returned by `/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub round: RoundState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panels: Option<Grid>,
    #[serde(rename = "backgroundImage", skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl StatusView {
    fn bare(round: RoundState) -> Self {
        Self {
            round,
            n: None,
            panels: None,
            background_image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundAdvance {
    pub round: RoundState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u8>,
    /// Roster players without a worksheet.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReset {
    pub round: RoundState,
    pub skipped: Vec<String>,
}

/// Game orchestration over one store.
pub struct GameService<'a> {
    store: &'a dyn SheetStore,
    game: &'a GameConfig,
    locks: &'a BoardLocks,
}

impl<'a> GameService<'a> {
    pub fn new(store: &'a dyn SheetStore, game: &'a GameConfig, locks: &'a BoardLocks) -> Self {
        Self { store, game, locks }
    }

    /// Current round and, while a round is active, the player's board.
    pub async fn status(&self, player: &str) -> Result<StatusView, AppError> {
        let board = self.game.board_for(player);
        // Held across the round read so a concurrent reset cannot pair the
        // old round with the new board.
        let _guard = self.read_guard(board).await;

        let round = rounds::get_round(self.store, &self.game.control_sheet).await?;
        let (Some(r), Some(n)) = (round.active_round(), round.board_side()) else {
            return Ok(StatusView::bare(round));
        };

        let grid = boards::read_board(self.store, board, n as u32).await?;
        Ok(StatusView {
            round,
            n: Some(n),
            panels: Some(padded(&grid, n as usize)),
            background_image: self.game.background_for(r).map(str::to_string),
        })
    }

    /// Player-initiated open of one panel.
    pub async fn open_panel(&self, user: &str, row: u32, col: u32) -> Result<(), AppError> {
        let board = self.game.board_for(user);
        self.open(board, row, col, Cell::PlayerOpened).await
    }

    /// Admin-initiated open. Without a `user` the admin board is targeted.
    pub async fn admin_open_panel(
        &self,
        user: Option<&str>,
        row: u32,
        col: u32,
    ) -> Result<(), AppError> {
        let board = match user {
            Some(user) => self.game.board_for(user),
            None => self.game.admin_board.as_str(),
        };
        self.open(board, row, col, Cell::AdminOpened).await
    }

    async fn open(&self, board: &str, row: u32, col: u32, cell: Cell) -> Result<(), AppError> {
        let _guard = self.write_guard(board).await;

        let round = rounds::get_round(self.store, &self.game.control_sheet).await?;
        let n = round.board_side().ok_or_else(|| {
            AppError::invalid(ErrorCode::RoundNotActive, "No round is currently active")
        })? as u32;
        if !(1..=n).contains(&row) || !(1..=n).contains(&col) {
            return Err(AppError::invalid(
                ErrorCode::InvalidCell,
                format!("Cell ({row}, {col}) is outside the {n}x{n} board"),
            ));
        }

        boards::write_cell(self.store, board, row, col, cell).await?;
        info!(board, row, col, value = cell.as_str(), "panel opened");
        Ok(())
    }

    /// Advance the round and lay out every board for it.
    ///
    /// Boards are rewritten before the new round is stored, so a failed reset
    /// leaves the previous round in place. Once the game is clear no board is
    /// touched.
    pub async fn next_round(&self) -> Result<RoundAdvance, AppError> {
        let (present, skipped) = boards::partition_existing(self.store, &self.game.players).await?;
        // Taken before the round read so two advances cannot both start from
        // the same round.
        let _guards = self.locks.write_many(&present).await;

        let control = self.game.control_sheet.as_str();
        let current = rounds::get_round(self.store, control).await?;
        let next = current.advance();

        let (Some(r), Some(n)) = (next.active_round(), next.board_side()) else {
            rounds::set_round(self.store, control, next).await?;
            info!(from = ?current, "game cleared");
            return Ok(RoundAdvance {
                round: next,
                n: None,
                skipped: Vec::new(),
            });
        };

        let preset = presets::load_preset(
            self.store,
            &self.game.presets_sheet,
            &self.game.presets,
            r,
        )
        .await?;
        for player in &skipped {
            warn!(player = %player, "worksheet missing; board reset skipped");
        }

        boards::reset_boards(self.store, &present, n as usize, &preset).await?;
        rounds::set_round(self.store, control, next).await?;

        info!(round = r, n, boards = present.len(), "round started");
        Ok(RoundAdvance {
            round: next,
            n: Some(n),
            skipped,
        })
    }

    /// Boards outside the roster are never reset, so they need no lock and
    /// arbitrary names never enter the registry.
    async fn read_guard(&self, board: &str) -> Option<OwnedRwLockReadGuard<()>> {
        if self.game.is_board(board) {
            Some(self.locks.read(board).await)
        } else {
            None
        }
    }

    async fn write_guard(&self, board: &str) -> Option<OwnedRwLockWriteGuard<()>> {
        if self.game.is_board(board) {
            Some(self.locks.write(board).await)
        } else {
            None
        }
    }

    /// Back to round 0 with every board and the results log cleared.
    pub async fn reset_game(&self) -> Result<GameReset, AppError> {
        let (present, skipped) = boards::partition_existing(self.store, &self.game.players).await?;
        for player in &skipped {
            warn!(player = %player, "worksheet missing; board clear skipped");
        }

        let _guards = self.locks.write_many(&present).await;
        rounds::set_round(self.store, &self.game.control_sheet, RoundState::NotStarted).await?;
        for player in &present {
            boards::clear_board(self.store, player).await?;
        }
        match results::clear(self.store, &self.game.results_sheet).await {
            Ok(()) => {}
            Err(e) if e.is_worksheet_not_found() => {
                warn!(sheet = %self.game.results_sheet, "results worksheet missing; nothing to clear");
            }
            Err(e) => return Err(e.into()),
        }

        info!(boards = present.len(), "game reset");
        Ok(GameReset {
            round: RoundState::NotStarted,
            skipped,
        })
    }
}

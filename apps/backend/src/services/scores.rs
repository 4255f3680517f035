//! Round scoring and the cumulative leaderboard.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::domain::board::count_opened;
use crate::domain::scoring::{final_totals, rank_scores};
use crate::domain::{PlayerScore, PlayerTotal};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::{boards, results, rounds};
use crate::services::board_locks::BoardLocks;
use crate::store::SheetStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundScores {
    pub round: u8,
    pub results: Vec<PlayerScore>,
    /// False when this round was already in the log.
    pub recorded: bool,
    pub skipped: Vec<String>,
}

pub struct ScoreService<'a> {
    store: &'a dyn SheetStore,
    game: &'a GameConfig,
    locks: &'a BoardLocks,
}

impl<'a> ScoreService<'a> {
    pub fn new(store: &'a dyn SheetStore, game: &'a GameConfig, locks: &'a BoardLocks) -> Self {
        Self { store, game, locks }
    }

    /// Score every board for the active round and log the round once.
    ///
    /// Board guards are held from the round read until the round is logged,
    /// so a concurrent advance or reset cannot swap boards under the count.
    pub async fn calculate(&self) -> Result<RoundScores, AppError> {
        let (present, mut skipped) =
            boards::partition_existing(self.store, &self.game.players).await?;
        let _guards = self.locks.read_many(&present).await;

        let round = rounds::get_round(self.store, &self.game.control_sheet).await?;
        let (Some(r), Some(n)) = (round.active_round(), round.board_side()) else {
            return Err(AppError::invalid(
                ErrorCode::RoundNotActive,
                "Scores can only be calculated during an active round",
            ));
        };
        let n = n as u32;
        let total = n * n;

        let mut scores = Vec::with_capacity(present.len());
        for player in present {
            match boards::read_board(self.store, &player, n).await {
                Ok(grid) => {
                    let opened = count_opened(&grid, n as usize);
                    scores.push(PlayerScore::new(player, opened, total));
                }
                // Deleted between listing and reading.
                Err(e) if e.is_worksheet_not_found() => skipped.push(player),
                Err(e) => return Err(e.into()),
            }
        }
        for player in &skipped {
            warn!(player = %player, "worksheet missing; excluded from scoring");
        }
        rank_scores(&mut scores, &self.game.players);

        let sheet = self.game.results_sheet.as_str();
        // Scorers share the board guards; this one makes check-then-append exclusive.
        let _log = self.locks.write(sheet).await;
        let logged = results::all_rows(self.store, sheet).await?;
        let recorded = if results::has_round(&logged, r) {
            false
        } else {
            results::append_round(self.store, sheet, r, &scores).await?;
            true
        };

        info!(round = r, players = scores.len(), recorded, "round scored");
        Ok(RoundScores {
            round: r,
            results: scores,
            recorded,
            skipped,
        })
    }

    /// Ranked totals over the whole results log.
    pub async fn final_scores(&self) -> Result<Vec<PlayerTotal>, AppError> {
        let rows = results::all_rows(self.store, &self.game.results_sheet).await?;
        Ok(final_totals(&rows, &self.game.players))
    }
}

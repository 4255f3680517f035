use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::AppError;
use crate::services::BoardLocks;
use crate::store::{SharedStore, SheetStore};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Spreadsheet handle; `None` when startup could not connect.
    pub store: Option<SharedStore>,
    pub game: Arc<GameConfig>,
    pub locks: Arc<BoardLocks>,
}

impl AppState {
    pub fn new(store: SharedStore, game: GameConfig) -> Self {
        Self {
            store: Some(store),
            game: Arc::new(game),
            locks: Arc::new(BoardLocks::new()),
        }
    }

    /// Degraded state: every store-backed endpoint reports not connected.
    pub fn without_store(game: GameConfig) -> Self {
        Self {
            store: None,
            game: Arc::new(game),
            locks: Arc::new(BoardLocks::new()),
        }
    }

    pub fn require_store(&self) -> Result<&dyn SheetStore, AppError> {
        self.store
            .as_deref()
            .ok_or_else(AppError::not_connected)
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("connected", &self.is_connected())
            .field("game", &self.game)
            .finish()
    }
}

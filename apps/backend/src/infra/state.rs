use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{GameConfig, StoreBackend, StoreConfig};
use crate::state::app_state::AppState;
use crate::store::sheets::ServiceAccountKey;
use crate::store::{MemoryStore, RetryingStore, SharedStore, SheetsStore, StoreError};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    game: GameConfig,
    store: Option<SharedStore>,
    store_config: Option<StoreConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            game: GameConfig::default(),
            store: None,
            store_config: None,
        }
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Use an already-built store; takes precedence over any store config.
    pub fn with_store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_store_config(mut self, config: StoreConfig) -> Self {
        self.store_config = Some(config);
        self
    }

    /// Never fails: a store that cannot be reached leaves the state degraded.
    pub async fn build(self) -> AppState {
        if let Some(store) = self.store {
            return AppState::new(store, self.game);
        }
        let Some(config) = self.store_config else {
            return AppState::without_store(self.game);
        };

        match connect_store(&config, &self.game).await {
            Ok(store) => AppState::new(store, self.game),
            Err(e) => {
                error!(error = %e, "spreadsheet connection failed; running without a store");
                AppState::without_store(self.game)
            }
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

async fn connect_store(config: &StoreConfig, game: &GameConfig) -> Result<SharedStore, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("using in-memory store; state is lost on restart");
            Ok(Arc::new(seeded_memory_store(game)))
        }
        StoreBackend::Sheets => {
            let raw = config
                .credentials
                .as_deref()
                .ok_or_else(|| StoreError::Auth("GOOGLE_CREDENTIALS is not set".to_string()))?;
            let key = ServiceAccountKey::from_json(raw)?;
            let sheets = SheetsStore::connect(key, config.target.clone(), config.timeout).await?;
            info!(retry = ?config.retry, "store calls are retried on transient failures");
            Ok(Arc::new(RetryingStore::new(sheets, config.retry.clone())))
        }
    }
}

/// Memory store holding every worksheet the game expects.
pub fn seeded_memory_store(game: &GameConfig) -> MemoryStore {
    let fixed = [
        game.control_sheet.as_str(),
        game.presets_sheet.as_str(),
        game.results_sheet.as_str(),
    ];
    MemoryStore::with_worksheets(
        fixed
            .into_iter()
            .chain(game.players.iter().map(String::as_str)),
    )
}

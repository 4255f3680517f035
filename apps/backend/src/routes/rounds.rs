use actix_web::{web, HttpResponse};

use super::success;
use crate::error::AppError;
use crate::services::GameService;
use crate::state::app_state::AppState;

/// POST /next_round
async fn next_round(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = app_state.require_store()?;
    let advance = GameService::new(store, &app_state.game, &app_state.locks)
        .next_round()
        .await?;
    Ok(success(advance))
}

/// POST /reset
async fn reset_game(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = app_state.require_store()?;
    let reset = GameService::new(store, &app_state.game, &app_state.locks)
        .reset_game()
        .await?;
    Ok(success(reset))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/next_round", web::post().to(next_round))
        .route("/reset", web::post().to(reset_game))
        .route("/reset_game", web::post().to(reset_game));
}

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::Span;

use super::{success, Message};
use crate::config::game::PING_PLAYER;
use crate::error::AppError;
use crate::services::GameService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub player: Option<String>,
}

/// GET /status?player=P
///
/// `player=ping` answers without touching the store, so it also works while
/// the server runs disconnected.
async fn get_status(
    query: web::Query<StatusQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player = match query.into_inner().player {
        Some(player) => player,
        None => app_state
            .game
            .players
            .first()
            .unwrap_or(&app_state.game.admin_board)
            .clone(),
    };
    if player == PING_PLAYER {
        return Ok(success(Message {
            message: "Server is awake.",
        }));
    }
    Span::current().record("player", player.as_str());

    let store = app_state.require_store()?;
    let view = GameService::new(store, &app_state.game, &app_state.locks)
        .status(&player)
        .await?;
    Ok(success(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(get_status))
        .route("/get_status", web::get().to(get_status));
}

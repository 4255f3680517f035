use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::Span;

use super::{success, Message};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::GameService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct OpenRequest {
    pub user: String,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Deserialize)]
pub struct AdminOpenRequest {
    pub user: Option<String>,
    pub row: u32,
    pub col: u32,
}

/// POST /open {user, row, col}
async fn open_panel(
    body: ValidatedJson<OpenRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let OpenRequest { user, row, col } = body.into_inner();
    Span::current().record("player", user.as_str());

    let store = app_state.require_store()?;
    GameService::new(store, &app_state.game, &app_state.locks)
        .open_panel(&user, row, col)
        .await?;
    Ok(success(Message {
        message: "Panel opened",
    }))
}

/// POST /admin_open {user?, row, col}
async fn admin_open_panel(
    body: ValidatedJson<AdminOpenRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let AdminOpenRequest { user, row, col } = body.into_inner();
    if let Some(user) = &user {
        Span::current().record("player", user.as_str());
    }

    let store = app_state.require_store()?;
    GameService::new(store, &app_state.game, &app_state.locks)
        .admin_open_panel(user.as_deref(), row, col)
        .await?;
    Ok(success(Message {
        message: "Panel opened",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/open", web::post().to(open_panel))
        .route("/open_panel", web::post().to(open_panel))
        .route("/admin_open", web::post().to(admin_open_panel))
        .route("/admin_open_panel", web::post().to(admin_open_panel));
}

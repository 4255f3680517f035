use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::success;
use crate::domain::PlayerTotal;
use crate::error::AppError;
use crate::services::ScoreService;
use crate::state::app_state::AppState;

#[derive(Serialize)]
struct Leaderboard {
    results: Vec<PlayerTotal>,
}

/// GET /scores
///
/// Scores the active round. The round is logged on the first call only.
async fn calculate_scores(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = app_state.require_store()?;
    let report = ScoreService::new(store, &app_state.game, &app_state.locks)
        .calculate()
        .await?;
    Ok(success(report))
}

/// GET /final_scores
async fn final_scores(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let store = app_state.require_store()?;
    let results = ScoreService::new(store, &app_state.game, &app_state.locks)
        .final_scores()
        .await?;
    Ok(success(Leaderboard { results }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/scores", web::get().to(calculate_scores))
        .route("/calculate_scores", web::get().to(calculate_scores))
        .route("/final_scores", web::get().to(final_scores))
        .route("/get_final_scores", web::get().to(final_scores));
}

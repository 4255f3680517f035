use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::store::SheetStore;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    worksheets: Option<usize>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();

    let now = OffsetDateTime::now_utc();
    let time = now
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    // Listing worksheets is the cheapest call that proves the credentials work.
    let (store, store_error, worksheets) = match app_state.require_store() {
        Ok(store) => match store.worksheets().await {
            Ok(titles) => ("ok".to_string(), None, Some(titles.len())),
            Err(e) => (
                "error".to_string(),
                Some(format!("Store query failed: {e}")),
                None,
            ),
        },
        Err(_) => ("not_connected".to_string(), None, None),
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version,
        store,
        store_error,
        worksheets,
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

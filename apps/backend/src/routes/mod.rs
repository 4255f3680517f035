use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::extractors::query_config;

pub mod health;
pub mod panels;
pub mod rounds;
pub mod scores;
pub mod status;

/// Success body: `status: "success"` plus the flattened payload.
#[derive(Serialize)]
struct Success<T: Serialize> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

pub(crate) fn success<T: Serialize>(body: T) -> HttpResponse {
    HttpResponse::Ok().json(Success {
        status: "success",
        body,
    })
}

#[derive(Serialize)]
pub(crate) struct Message {
    pub message: &'static str,
}

/// Register every endpoint. Paths from older clients are kept as aliases.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config());
    cfg.configure(health::configure_routes)
        .configure(status::configure_routes)
        .configure(panels::configure_routes)
        .configure(rounds::configure_routes)
        .configure(scores::configure_routes);
}

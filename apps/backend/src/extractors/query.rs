use actix_web::web;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Query-string config rendering decode failures as `BAD_REQUEST` envelopes.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "query string rejected");
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
    })
}

use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS middleware.
///
/// `CORS_ALLOWED_ORIGINS` is a comma-separated allow list. When it is unset or
/// holds no valid origin, any origin is accepted: the game page is served from
/// a separate static host.
pub fn cors_middleware() -> Cors {
    let allowed_raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let allowed_origins = parse_origins(&allowed_raw);

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    for origin in allowed_origins {
        cors = cors.allowed_origin(&origin);
    }
    cors
}

/// Keep `http(s)://` entries, ignoring blanks and `null`.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect()
}

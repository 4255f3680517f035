use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Panel requests carry a player name and two coordinates; anything larger
/// than this is not a game request.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body whose failures render as `BAD_REQUEST` envelopes.
///
/// A blank body reads as `{}`, so a missing required field is reported by
/// name instead of as an end-of-input error.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, AppError>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let path = req.path().to_string();
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(path = %path, error = %e, "request body read failed");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            parse_body(&body).map(ValidatedJson).map_err(|detail| {
                debug!(path = %path, body_size = body.len(), detail = %detail, "request body rejected");
                AppError::bad_request(ErrorCode::BadRequest, detail)
            })
        })
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(raw).map_err(|e| match e.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", e.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => format!("Invalid request body: {e}"),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    })
}

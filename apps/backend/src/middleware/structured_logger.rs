use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::errors::ErrorCode;

/// Emits one `request_completed` event per request.
///
/// Every failed request answers 500, so the level comes from the error code
/// the envelope attached to the response when there is one.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

fn level_for(status: StatusCode, code: Option<ErrorCode>) -> Level {
    match code {
        Some(code) if code.is_caller_fault() => Level::WARN,
        Some(_) => Level::ERROR,
        None if status.is_server_error() => Level::ERROR,
        None if status.is_client_error() => Level::WARN,
        None => Level::INFO,
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let fut = self.service.call(req);

        // Method, path and trace id come from the enclosing request span.
        Box::pin(async move {
            let result = fut.await;

            let (status, code) = match &result {
                Ok(res) => (
                    res.status(),
                    res.response().extensions().get::<ErrorCode>().copied(),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };
            let status_code = status.as_u16();
            let error_code = code.map(|c| c.as_str()).unwrap_or("");
            let duration_us = start.elapsed().as_micros() as u64;

            let level = level_for(status, code);
            if level == Level::ERROR {
                error!(http.status_code = status_code, error_code, duration_us, "request_completed");
            } else if level == Level::WARN {
                warn!(http.status_code = status_code, error_code, duration_us, "request_completed");
            } else {
                info!(http.status_code = status_code, duration_us, "request_completed");
            }

            result
        })
    }
}

//! Per-request tracing span.
//!
//! Every event logged while serving a request inherits `trace_id`, `method`,
//! `path` and, when the request names one, `player`. `/status` carries the
//! player in its query string and is recorded here; body-carried players are
//! recorded by the handlers once the body is parsed. Needs the trace id that
//! `RequestTrace` stores, so it must be wrapped inside it:
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)

use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::web::Query;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{field, info_span, Instrument};

use crate::trace_ctx;

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

/// `player` query parameter, if the query string parses and has one.
fn query_player(query: &str) -> Option<String> {
    Query::<HashMap<String, String>>::from_query(query)
        .ok()?
        .into_inner()
        .remove("player")
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(trace_ctx::trace_id);

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
            player = field::Empty,
        );
        if let Some(player) = query_player(req.query_string()) {
            span.record("player", player.as_str());
        }

        Box::pin(self.service.call(req).instrument(span))
    }
}

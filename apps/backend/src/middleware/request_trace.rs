use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

const REQUEST_ID: &str = "x-request-id";

/// Longest caller-supplied request id that is reused as the trace id.
const MAX_INBOUND_ID: usize = 64;

/// Assigns each request a trace id and echoes it back as `x-request-id`.
///
/// A well-formed inbound `x-request-id` (for example from the proxy in front
/// of the game page) is kept so logs line up across hops. Otherwise a fresh
/// v4 uuid is minted. The id is stored in request extensions and scoped as
/// the task-local trace context while the handler runs.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

fn inbound_id(value: Option<&HeaderValue>) -> Option<String> {
    let id = value?.to_str().ok()?.trim();
    let well_formed = !id.is_empty()
        && id.len() <= MAX_INBOUND_ID
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    well_formed.then(|| id.to_string())
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = inbound_id(req.headers().get(REQUEST_ID))
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(trace_id.clone());

        let header = HeaderValue::from_str(&trace_id).ok();
        let fut = self.service.call(req);

        Box::pin(trace_ctx::with_trace_id(trace_id, async move {
            let mut res = fut.await?;
            if let Some(value) = header {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID), value);
            }
            Ok(res)
        }))
    }
}

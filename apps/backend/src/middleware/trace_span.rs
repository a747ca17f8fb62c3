//! Per-request tracing span.
//!
//! Opens an `info_span!("request")` carrying the trace id, method, path and,
//! for game endpoints, the game named in the path. Orchestrator and game
//! events logged while handling the request inherit these fields.
//!
//! Reads the [`TraceId`] that `RequestTrace` stored in extensions, so it must
//! be wrapped inside it:
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use tracing::{field, info_span, Instrument};

use super::request_trace::TraceId;
use crate::domain::session::GameKind;

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
        let span = info_span!(
            "request",
            trace_id = %TraceId::of(&req),
            method = %req.method(),
            path = %req.path(),
            game = field::Empty,
        );
        if let Some(game) = game_in_path(req.path()) {
            span.record("game", game.as_str());
        }

        Box::pin(self.service.call(req).instrument(span))
    }
}

/// Game named by `/api/{game}/...`, if the segment is a known game.
///
/// Routing has not run yet when middleware sees the request, so this reads
/// the raw path instead of match info.
pub(crate) fn game_in_path(path: &str) -> Option<GameKind> {
    let mut segments = path.trim_start_matches('/').split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("api"), Some(game), Some("play" | "resume")) => GameKind::from_path_segment(game),
        _ => None,
    }
}

//! One `request_completed` event per request.
//!
//! The level follows the status class: 5xx at `error`, 4xx at `warn`,
//! everything else at `info`. Turn failures are reported in a 200 body, so
//! they show up here at `info` and are logged at `warn` by the orchestrator.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use super::trace_span::game_in_path;

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

/// What gets logged once the response is known.
struct Completed {
    method: String,
    path: String,
    game: &'static str,
    trace_id: String,
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
        let completed = Completed {
            method: req.method().to_string(),
            path: req.path().to_string(),
            game: game_in_path(req.path()).map_or("-", |g| g.as_str()),
            trace_id: TraceId::of(&req),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
            completed.log(status, duration_us);

            result
        })
    }
}

impl Completed {
    fn log(&self, status: StatusCode, duration_us: u64) {
        let Completed {
            method,
            path,
            game,
            trace_id,
        } = self;
        let status_code = status.as_u16();
        if status.is_server_error() {
            error!(http.method = %method, url.path = %path, game, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
        } else if status.is_client_error() {
            warn!(http.method = %method, url.path = %path, game, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
        } else {
            info!(http.method = %method, url.path = %path, game, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
        }
    }
}

//! Tenant resolution + request accounting middleware.
//!
//! For every request:
//! - resolve the tenant from the `Host` header (unknown tenant -> 400)
//! - run the handler inside a `request` span carrying the tenant id
//! - render error detail according to the configured environment
//! - record `(route key, elapsed, is_error)` into the tenant's metrics

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::app_state::AppState;
use crate::context::tenant::resolve_tenant;
use crate::error::ApiError;

/// Key used for requests that matched no route, so arbitrary paths cannot
/// grow the route map.
pub const UNMATCHED_ROUTE: &str = "*";

/// `"{METHOD} {route}"`.
pub fn route_key(method: &str, matched: Option<&str>) -> String {
    format!("{method} {}", matched.unwrap_or(UNMATCHED_ROUTE))
}

pub async fn track_requests(State(app): State<AppState>, mut req: Request, next: Next) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let tenant = match resolve_tenant(&app, host.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(host = host.as_deref().unwrap_or(""), "request for unknown tenant");
            return ApiError::from(e).render(app.environment());
        }
    };

    let method = req.method().clone();
    let route = route_key(
        method.as_str(),
        req.extensions().get::<MatchedPath>().map(MatchedPath::as_str),
    );
    let span = tracing::info_span!("request", tenant = %tenant.id(), route = %route);

    req.extensions_mut().insert(tenant.clone());

    let started = Instant::now();
    let mut res = next.run(req).instrument(span.clone()).await;
    let elapsed = started.elapsed();

    if let Some(err) = res.extensions().get::<ApiError>().cloned() {
        span.in_scope(|| err.log());
        res = err.render(app.environment());
    }

    let status = res.status();
    tenant
        .metrics()
        .record_request(&route, elapsed, status.is_client_error() || status.is_server_error());

    span.in_scope(|| {
        tracing::debug!(status = status.as_u16(), elapsed_ms = elapsed.as_millis() as u64, "request completed");
    });

    res.into_response()
}

//! Axum router wiring.
//!
//! Layer order (outermost first): tenant resolution + metrics, panic
//! catcher, route handlers. The fallback is covered by both layers so
//! unmatched requests are still counted and still get a JSON body.

use std::any::Any;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{app_state::AppState, error::ApiError, obs, ops, services};

pub fn build_router(state: AppState) -> Router {
    build_router_with(state, Router::new())
}

/// Same stack as [`build_router`] with `extra` routes mounted alongside the
/// built-in ones, so they share tenant resolution, metrics, panic capture
/// and error rendering.
pub fn build_router_with(state: AppState, extra: Router<AppState>) -> Router {
    Router::new()
        .route("/health", get(ops::health))
        .route("/readiness", get(ops::readiness))
        .route("/info", get(ops::info))
        .route("/timestamp", get(ops::timestamp))
        .route("/routes", get(ops::routes))
        .route("/register", post(services::register::register))
        .merge(extra)
        .fallback(ops::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            obs::middleware::track_requests,
        ))
        .with_state(state)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::from_panic(payload).into_response()
}

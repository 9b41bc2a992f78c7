//! Diagnostics HTTP endpoints.
//!
//! - `/health`    : tenant start time + process uptime
//! - `/readiness` : static ok
//! - `/info`      : host facts + tenant metric totals
//! - `/timestamp` : current time in several representations
//! - `/routes`    : per-route metrics for the current tenant
//!
//! Pure read views; no validation and no mutation.

pub mod host;

use axum::{extract::State, response::IntoResponse, Extension, Json};
use chrono::{Local, Utc};
use serde_json::{json, Value};

use tenantgate_core::GateError;

use crate::app_state::AppState;
use crate::context::TenantContext;
use crate::error::ApiError;

use host::{iso, timezone_name, HostFacts};

pub async fn health(State(app): State<AppState>, Extension(tenant): Extension<TenantContext>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "message": "health check",
        "started": iso(tenant.metrics().started()),
        "uptimeSeconds": app.uptime().as_secs_f64(),
        "now": iso(Utc::now()),
    }))
}

pub async fn readiness() -> Json<Value> {
    Json(json!({ "ok": true, "message": "ready" }))
}

pub async fn info(Extension(tenant): Extension<TenantContext>) -> Json<Value> {
    let h = HostFacts::gather();
    let m = tenant.metrics().snapshot();
    Json(json!({
        "ok": true,
        "hostname": h.hostname,
        "platform": h.platform,
        "release": h.release,
        "arch": h.arch,
        "totalMem": h.total_mem,
        "usedMem": h.used_mem,
        "memUsedPercent": h.mem_used_percent,
        "cpuModel": h.cpu_model,
        "cpuCores": h.cpu_cores,
        "ip": h.ip,
        "uptimeSeconds": h.uptime_seconds,
        "timezone": h.timezone,
        "currentTime": h.current_time,
        "tenant": tenant.domain(),
        "started": iso(m.started),
        "totalRequests": m.total_requests,
        "totalErrors": m.total_errors,
    }))
}

pub async fn timestamp() -> Json<Value> {
    let now = Local::now();
    let utc = now.with_timezone(&Utc);
    Json(json!({
        "ok": true,
        "iso": iso(utc),
        "utc": utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        "local": now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string(),
        "timestamp": utc.timestamp_millis(),
        "timezone": timezone_name(),
        // minutes to add to local time to reach UTC (positive west of UTC)
        "offsetMinutes": -(now.offset().local_minus_utc() / 60),
    }))
}

pub async fn routes(Extension(tenant): Extension<TenantContext>) -> Json<Value> {
    let m = tenant.metrics().snapshot();
    Json(json!({
        "ok": true,
        "tenant": tenant.domain(),
        "totalRequests": m.total_requests,
        "totalErrors": m.total_errors,
        "timezone": timezone_name(),
        "routes": m.routes,
    }))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    ApiError::from(GateError::NotFound)
}

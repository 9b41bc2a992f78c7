//! Per-tenant request metrics.
//!
//! One `TenantMetrics` per tenant, shared through the tenant runtime by every
//! request for that tenant. Counters are only ever incremented. The totals
//! and the per-route entry of one request are applied under a single lock,
//! so concurrent requests never lose updates and a snapshot never observes
//! half of a request.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw counters for one route key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteCounters {
    pub count: u64,
    pub total_time_ms: f64,
}

impl RouteCounters {
    /// Mean response time, rounded to 2 decimals (0 when nothing recorded).
    pub fn avg_response_ms(&self) -> f64 {
        average_ms(self.total_time_ms, self.count)
    }
}

#[derive(Debug, Default)]
struct Counters {
    total_requests: u64,
    total_errors: u64,
    routes: BTreeMap<String, RouteCounters>,
}

#[derive(Debug)]
pub struct TenantMetrics {
    started: DateTime<Utc>,
    inner: Mutex<Counters>,
}

impl Default for TenantMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TenantMetrics {
    pub fn new() -> Self {
        Self {
            started: Utc::now(),
            inner: Mutex::new(Counters::default()),
        }
    }

    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }

    // Counters stay consistent even if a holder panicked; keep serving them.
    fn lock(&self) -> MutexGuard<'_, Counters> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one completed request.
    pub fn record_request(&self, route: &str, elapsed: Duration, is_error: bool) {
        self.record_ms(route, elapsed.as_secs_f64() * 1000.0, is_error);
    }

    /// Same as [`record_request`](Self::record_request) with a millisecond value.
    /// Negative or non-finite durations count as 0.
    pub fn record_ms(&self, route: &str, elapsed_ms: f64, is_error: bool) {
        let elapsed_ms = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            elapsed_ms
        } else {
            0.0
        };

        let mut c = self.lock();
        c.total_requests = c.total_requests.saturating_add(1);
        if is_error {
            c.total_errors = c.total_errors.saturating_add(1);
        }

        let entry = c.routes.entry(route.to_string()).or_default();
        entry.count = entry.count.saturating_add(1);
        entry.total_time_ms += elapsed_ms;
    }

    pub fn total_requests(&self) -> u64 {
        self.lock().total_requests
    }

    pub fn total_errors(&self) -> u64 {
        self.lock().total_errors
    }

    pub fn route(&self, route: &str) -> Option<RouteCounters> {
        self.lock().routes.get(route).copied()
    }

    /// Consistent read view. Averages are derived here, never stored.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let c = self.lock();
        MetricsSnapshot {
            started: self.started,
            total_requests: c.total_requests,
            total_errors: c.total_errors,
            routes: c
                .routes
                .iter()
                .map(|(route, rc)| RouteStats {
                    route: route.clone(),
                    calls: rc.count,
                    avg_response_ms: rc.avg_response_ms(),
                })
                .collect(),
        }
    }
}

/// One row of the `/routes` view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    pub route: String,
    pub calls: u64,
    pub avg_response_ms: f64,
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub started: DateTime<Utc>,
    pub total_requests: u64,
    pub total_errors: u64,
    /// Ordered by route key.
    pub routes: Vec<RouteStats>,
}

/// `total_ms / count` rounded to 2 decimals; 0 when `count == 0`.
pub fn average_ms(total_ms: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    ((total_ms / count as f64) * 100.0).round() / 100.0
}

//! Request observability: per-tenant metrics and the middleware feeding them.
//!
//! Metrics are plain in-process counters owned by each tenant runtime and
//! read back by the diagnostics endpoints. Logging goes through `tracing`,
//! inside a per-request span tagged with the tenant id.

pub mod metrics;
pub mod middleware;

pub use metrics::{MetricsSnapshot, RouteStats, TenantMetrics};

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use tenantgate_gateway::obs::metrics::{average_ms, TenantMetrics};
use tenantgate_gateway::obs::middleware::route_key;

#[test]
fn average_is_zero_without_calls() {
    assert_eq!(average_ms(0.0, 0), 0.0);
    assert_eq!(average_ms(123.0, 0), 0.0);
}

#[test]
fn average_rounds_to_two_decimals() {
    assert_eq!(average_ms(10.0, 3), 3.33);
    assert_eq!(average_ms(2.0, 3), 0.67);
    assert_eq!(average_ms(5.0, 2), 2.5);
}

#[test]
fn record_updates_totals_and_route() {
    let m = TenantMetrics::new();
    m.record_ms("GET /health", 4.0, false);
    m.record_ms("GET /health", 2.0, false);
    m.record_ms("POST /register", 10.0, true);
    m.record_request("GET /health", Duration::from_millis(3), false);

    assert_eq!(m.total_requests(), 4);
    assert_eq!(m.total_errors(), 1);

    let health = m.route("GET /health").unwrap();
    assert_eq!(health.count, 3);
    assert!((health.total_time_ms - 9.0).abs() < 1e-9);
    assert!(m.route("GET /missing").is_none());

    let snap = m.snapshot();
    assert_eq!(snap.total_requests, 4);
    let routes: Vec<_> = snap.routes.iter().map(|r| r.route.as_str()).collect();
    assert_eq!(routes, vec!["GET /health", "POST /register"]);
    assert_eq!(snap.routes[0].calls, 3);
    assert_eq!(snap.routes[0].avg_response_ms, 3.0);
    assert_eq!(snap.routes[1].avg_response_ms, 10.0);
}

#[test]
fn invalid_durations_count_as_zero() {
    let m = TenantMetrics::new();
    m.record_ms("GET /x", -5.0, false);
    m.record_ms("GET /x", f64::NAN, false);
    let r = m.route("GET /x").unwrap();
    assert_eq!(r.count, 2);
    assert_eq!(r.total_time_ms, 0.0);
}

#[test]
fn snapshot_serializes_camel_case() {
    let m = TenantMetrics::new();
    m.record_ms("GET /a", 1.0, false);
    let v = serde_json::to_value(&m.snapshot().routes).unwrap();
    assert_eq!(
        v,
        serde_json::json!([{ "route": "GET /a", "calls": 1, "avgResponseMs": 1.0 }])
    );
}

#[test]
fn route_keys() {
    assert_eq!(route_key("GET", Some("/health")), "GET /health");
    assert_eq!(route_key("GET", None), "GET *");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_records_are_not_lost() {
    const N: usize = 2_000;
    let m = Arc::new(TenantMetrics::new());

    // quarter-millisecond steps keep every partial sum exact in f64
    let elapsed = |i: usize| (i % 7) as f64 * 0.25;

    let tasks: Vec<_> = (0..N)
        .map(|i| {
            let m = Arc::clone(&m);
            tokio::spawn(async move {
                m.record_ms("GET /health", elapsed(i), false);
            })
        })
        .collect();
    for r in futures_util::future::join_all(tasks).await {
        r.unwrap();
    }

    let sum: f64 = (0..N).map(elapsed).sum();
    let route = m.route("GET /health").unwrap();
    assert_eq!(route.count, N as u64);
    assert_eq!(m.total_requests(), N as u64);
    assert_eq!(m.total_errors(), 0);

    let snap = m.snapshot();
    assert_eq!(snap.routes[0].avg_response_ms, average_ms(sum, N as u64));
}

#[test]
fn concurrent_threads_mixed_routes() {
    let m = TenantMetrics::new();
    std::thread::scope(|s| {
        for t in 0..8 {
            let m = &m;
            s.spawn(move || {
                for _ in 0..500 {
                    let route = if t % 2 == 0 { "GET /a" } else { "GET /b" };
                    m.record_ms(route, 1.0, t == 0);
                }
            });
        }
    });
    assert_eq!(m.total_requests(), 4_000);
    assert_eq!(m.total_errors(), 500);
    assert_eq!(m.route("GET /a").unwrap().count, 2_000);
    assert_eq!(m.route("GET /b").unwrap().count, 2_000);
}

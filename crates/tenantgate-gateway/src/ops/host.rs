//! Host-level facts for `/info` and `/timestamp`.
//!
//! Best-effort: read from std and, on Linux, `/proc`. Anything unavailable
//! falls back to `"unknown"` or 0 instead of failing the request.

use std::fs;
use std::net::{IpAddr, UdpSocket};

use chrono::{DateTime, SecondsFormat, Utc};

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone)]
pub struct HostFacts {
    pub hostname: String,
    pub platform: String,
    pub release: String,
    pub arch: String,
    pub total_mem: u64,
    pub used_mem: u64,
    /// Percentage with two decimals, e.g. `"42.17"`.
    pub mem_used_percent: String,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub ip: String,
    pub uptime_seconds: f64,
    pub timezone: String,
    pub current_time: String,
}

impl HostFacts {
    pub fn gather() -> Self {
        let (total_mem, used_mem) = memory();
        Self {
            hostname: hostname(),
            platform: std::env::consts::OS.to_string(),
            release: read_trimmed("/proc/sys/kernel/osrelease").unwrap_or_else(|| UNKNOWN.into()),
            arch: std::env::consts::ARCH.to_string(),
            total_mem,
            used_mem,
            mem_used_percent: percent(used_mem, total_mem),
            cpu_model: cpu_model(),
            cpu_cores: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            ip: local_ipv4().map(|ip| ip.to_string()).unwrap_or_else(|| UNKNOWN.into()),
            uptime_seconds: host_uptime(),
            timezone: timezone_name(),
            current_time: iso(Utc::now()),
        }
    }
}

/// RFC 3339 UTC with millisecond precision (`2026-10-19T08:00:00.000Z`).
pub fn iso(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// IANA zone from `TZ` or `/etc/timezone`, else `"UTC"`.
pub fn timezone_name() -> String {
    std::env::var("TZ")
        .ok()
        .map(|s| s.trim_start_matches(':').trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| read_trimmed("/etc/timezone"))
        .unwrap_or_else(|| "UTC".into())
}

fn read_trimmed(path: &str) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn hostname() -> String {
    read_trimmed("/proc/sys/kernel/hostname")
        .or_else(|| read_trimmed("/etc/hostname"))
        .or_else(|| std::env::var("HOSTNAME").ok().filter(|s| !s.is_empty()))
        .unwrap_or_else(|| UNKNOWN.into())
}

/// (total, used) in bytes; used = total - available.
fn memory() -> (u64, u64) {
    let Some(info) = read_trimmed("/proc/meminfo") else {
        return (0, 0);
    };
    let total = meminfo_kib(&info, "MemTotal").unwrap_or(0) * 1024;
    let available = meminfo_kib(&info, "MemAvailable")
        .or_else(|| meminfo_kib(&info, "MemFree"))
        .unwrap_or(0)
        * 1024;
    (total, total.saturating_sub(available))
}

fn meminfo_kib(meminfo: &str, key: &str) -> Option<u64> {
    meminfo.lines().find_map(|line| {
        let rest = line.strip_prefix(key)?.strip_prefix(':')?;
        rest.split_whitespace().next()?.parse().ok()
    })
}

fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0.00".into();
    }
    format!("{:.2}", part as f64 / total as f64 * 100.0)
}

fn cpu_model() -> String {
    read_trimmed("/proc/cpuinfo")
        .and_then(|info| {
            info.lines().find_map(|line| {
                let (key, value) = line.split_once(':')?;
                (key.trim() == "model name").then(|| value.trim().to_string())
            })
        })
        .unwrap_or_else(|| UNKNOWN.into())
}

fn host_uptime() -> f64 {
    read_trimmed("/proc/uptime")
        .and_then(|s| s.split_whitespace().next()?.parse().ok())
        .unwrap_or(0.0)
}

/// Primary non-loopback IPv4. Connecting a UDP socket only selects a route;
/// no packet is sent.
fn local_ipv4() -> Option<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(("192.0.2.1", 80)).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    (ip.is_ipv4() && !ip.is_loopback() && !ip.is_unspecified()).then_some(ip)
}

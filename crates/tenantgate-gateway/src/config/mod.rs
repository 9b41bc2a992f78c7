//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use tenantgate_core::error::{GateError, Result};

pub use schema::{Environment, GatewayConfig, GatewaySection, RegistrationPolicy, TenantConfig};

/// Environment variable overriding the config path.
pub const CONFIG_PATH_ENV: &str = "TENANTGATE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "tenantgate.yaml";

/// Errors name `path` so a misconfigured deployment points at the file.
pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GateError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s).map_err(|e| match e {
        GateError::BadRequest(m) => GateError::BadRequest(format!("config {path}: {m}")),
        other => other,
    })
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| GateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

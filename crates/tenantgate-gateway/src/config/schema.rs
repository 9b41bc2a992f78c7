use std::collections::HashSet;

use serde::Deserialize;
use tenantgate_core::error::{GateError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub tenants: Vec<TenantConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GateError::UnsupportedVersion);
        }
        if self.tenants.is_empty() {
            return Err(GateError::BadRequest("tenants must not be empty".into()));
        }

        let mut ids = HashSet::new();
        let mut domains = HashSet::new();
        for t in &self.tenants {
            t.validate()?;
            if !ids.insert(t.id.as_str()) {
                return Err(GateError::BadRequest(format!("duplicate tenant id: {}", t.id)));
            }
            if !domains.insert(t.domain.to_ascii_lowercase()) {
                return Err(GateError::BadRequest(format!(
                    "duplicate tenant domain: {}",
                    t.domain
                )));
            }
        }

        if let Some(default) = &self.gateway.default_tenant {
            if !ids.contains(default.as_str()) {
                return Err(GateError::BadRequest(format!(
                    "gateway.default_tenant refers to unknown tenant: {default}"
                )));
            }
        }

        Ok(())
    }
}

/// Deployment environment; controls how much error detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub environment: Environment,

    /// Tenant used when the `Host` header matches no tenant domain.
    #[serde(default)]
    pub default_tenant: Option<String>,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            environment: Environment::default(),
            default_tenant: None,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantConfig {
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub registration: RegistrationPolicy,
}

impl TenantConfig {
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(GateError::BadRequest("tenant id must not be empty".into()));
        }
        if self.domain.trim().is_empty() {
            return Err(GateError::BadRequest(format!(
                "tenant {}: domain must not be empty",
                self.id
            )));
        }
        self.registration.validate(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationPolicy {
    #[serde(default = "default_password_min")]
    pub password_min: usize,
    #[serde(default = "default_password_max")]
    pub password_max: usize,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            password_min: default_password_min(),
            password_max: default_password_max(),
        }
    }
}

impl RegistrationPolicy {
    fn validate(&self, tenant: &str) -> Result<()> {
        if self.password_min == 0 || self.password_min > self.password_max {
            return Err(GateError::BadRequest(format!(
                "tenant {tenant}: registration.password_min must be between 1 and password_max"
            )));
        }
        Ok(())
    }
}

fn default_password_min() -> usize {
    12
}
fn default_password_max() -> usize {
    60
}

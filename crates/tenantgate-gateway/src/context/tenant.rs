use std::sync::Arc;

use tenantgate_core::error::{GateError, Result};
use tenantgate_core::Schema;

use crate::app_state::AppState;
use crate::config::TenantConfig;
use crate::obs::TenantMetrics;
use crate::services::register::registration_schema;
use crate::services::store::UserStore;

/// Tenant-scoped runtime.
/// Construct once at startup, then share via Arc.
pub struct TenantRuntime {
    pub id: String,
    /// Lowercased host name this tenant answers on.
    pub domain: String,
    pub metrics: TenantMetrics,
    pub users: Arc<dyn UserStore>,
    pub registration: Schema,
}

impl TenantRuntime {
    pub fn new(cfg: &TenantConfig, users: Arc<dyn UserStore>) -> Result<Self> {
        Ok(Self {
            id: cfg.id.clone(),
            domain: cfg.domain.trim().to_ascii_lowercase(),
            metrics: TenantMetrics::new(),
            users,
            registration: registration_schema(&cfg.registration)?,
        })
    }
}

/// Resolved tenant for one request (cheap to clone).
#[derive(Clone)]
pub struct TenantContext {
    runtime: Arc<TenantRuntime>,
}

impl TenantContext {
    pub fn new(runtime: TenantRuntime) -> Self {
        Self {
            runtime: Arc::new(runtime),
        }
    }

    pub fn id(&self) -> &str {
        &self.runtime.id
    }
    pub fn domain(&self) -> &str {
        &self.runtime.domain
    }
    pub fn metrics(&self) -> &TenantMetrics {
        &self.runtime.metrics
    }
    pub fn users(&self) -> &dyn UserStore {
        self.runtime.users.as_ref()
    }
    pub fn registration_schema(&self) -> &Schema {
        &self.runtime.registration
    }
}

/// Host name without port, lowercased. Bracketed IPv6 literals keep brackets.
pub fn host_name(host: &str) -> String {
    let host = host.trim();
    let name = if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };
    name.to_ascii_lowercase()
}

/// Resolve the tenant for a `Host` header value, falling back to the
/// configured default tenant, or return a client-visible error.
pub fn resolve_tenant(state: &AppState, host: Option<&str>) -> Result<TenantContext> {
    host.and_then(|h| state.tenant_for_domain(&host_name(h)))
        .or_else(|| state.default_tenant())
        .ok_or_else(|| GateError::BadRequest("unknown tenant".into()))
}

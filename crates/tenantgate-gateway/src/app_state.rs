//! Shared application state.
//!
//! Builds one tenant runtime per configured tenant and indexes them by id and
//! by domain. Startup errors are returned, never panicked on.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tenantgate_core::error::{GateError, Result};

use crate::config::{Environment, GatewayConfig, TenantConfig};
use crate::context::{TenantContext, TenantRuntime};
use crate::services::store::{MemoryUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    tenants: HashMap<String, TenantContext>,
    domains: HashMap<String, String>,
    started: Instant,
}

impl AppState {
    /// Build state with an in-memory user store per tenant.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_stores(cfg, |_| Arc::new(MemoryUserStore::new()))
    }

    /// Build state with a caller-provided user store per tenant.
    pub fn with_stores<F>(cfg: GatewayConfig, mut make_store: F) -> Result<Self>
    where
        F: FnMut(&TenantConfig) -> Arc<dyn UserStore>,
    {
        let mut tenants = HashMap::new();
        let mut domains = HashMap::new();

        for t in &cfg.tenants {
            let runtime = TenantRuntime::new(t, make_store(t)).map_err(|e| {
                GateError::BadRequest(format!("tenant runtime build failed (tenant={}): {e}", t.id))
            })?;
            domains.insert(runtime.domain.clone(), t.id.clone());
            tenants.insert(t.id.clone(), TenantContext::new(runtime));
            tracing::debug!(tenant = %t.id, domain = %t.domain, "tenant runtime ready");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                tenants,
                domains,
                started: Instant::now(),
            }),
        })
    }

    pub fn environment(&self) -> Environment {
        self.inner.cfg.gateway.environment
    }

    pub fn tenant(&self, tenant_id: &str) -> Option<TenantContext> {
        self.inner.tenants.get(tenant_id).cloned()
    }

    /// `domain` must already be lowercased and port-free.
    pub fn tenant_for_domain(&self, domain: &str) -> Option<TenantContext> {
        self.inner
            .domains
            .get(domain)
            .and_then(|id| self.tenant(id))
    }

    pub fn default_tenant(&self) -> Option<TenantContext> {
        self.inner
            .cfg
            .gateway
            .default_tenant
            .as_deref()
            .and_then(|id| self.tenant(id))
    }

    pub fn tenant_count(&self) -> usize {
        self.inner.tenants.len()
    }

    /// Process uptime.
    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }
}

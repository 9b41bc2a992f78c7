//! tenantgate gateway binary.
//!
//! - Loads `tenantgate.yaml` (or `$TENANTGATE_CONFIG`), strict parsing
//! - One runtime per tenant: metrics, user store, registration schema
//! - Serves diagnostics + registration over HTTP/JSON

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use tenantgate_core::error::{GateError, Result};
use tenantgate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "tenantgate-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    tracing::info!(config = %path, "loading config");
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.gateway.listen.parse().map_err(|e| {
        GateError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
    })?;

    let state = app_state::AppState::new(cfg)?;
    let tenants = state.tenant_count();
    let environment = state.environment();
    let app = router::build_router(state);

    tracing::info!(%listen, tenants, ?environment, "tenantgate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| GateError::Internal(format!("bind failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| GateError::Internal(format!("server failed: {e}")))
}

//! Tenant context types shared across layers.
//!
//! Every request is bound to exactly one tenant: its own metrics, user store
//! and compiled registration schema, all built once at startup.

pub mod tenant;

pub use tenant::{resolve_tenant, TenantContext, TenantRuntime};

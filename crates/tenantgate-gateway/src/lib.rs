//! tenantgate gateway library entry.
//!
//! This crate wires tenant resolution, per-tenant metrics, the diagnostics
//! endpoints, and the registration workflow into one axum service. It is
//! intended to be consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;

//! tenantgate core: transport-agnostic request validation and redaction.
//!
//! This crate defines the field validator set, the schema that applies it to
//! whole request bodies, the secret-redaction operation used on every
//! response path, and the error surface shared with the gateway. It carries
//! no HTTP or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `GateError`/`Result` or as collected
//! validation messages, so malformed client input never crashes a process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod sanitize;
pub mod schema;

/// Shared result type.
pub use error::{GateError, Result};
pub use sanitize::redact_secrets;
pub use schema::{FieldConstraint, FieldKind, Schema, ValidationOutcome};

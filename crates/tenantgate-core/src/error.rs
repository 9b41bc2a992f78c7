//! Shared error type across tenantgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Unique-constraint violation reported by a store.
    Conflict,
    /// Any other store failure.
    Storage,
    /// No route or resource matched.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// Stable code name, recorded on error log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::Storage => "STORAGE",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("not found")]
    NotFound,
    #[error("internal: {0}")]
    Internal(String),
}

impl GateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GateError::BadRequest(_) => ClientCode::BadRequest,
            GateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            GateError::Conflict(_) => ClientCode::Conflict,
            GateError::Storage(_) => ClientCode::Storage,
            GateError::NotFound => ClientCode::NotFound,
            GateError::Internal(_) => ClientCode::Internal,
        }
    }
}

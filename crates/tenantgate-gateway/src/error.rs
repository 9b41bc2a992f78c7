//! HTTP error surface.
//!
//! Handlers return [`ApiError`] for anything they do not turn into a
//! structured domain response. `into_response` renders the production-safe
//! body and stashes the error in the response extensions; the request
//! middleware then logs it inside the tenant span and re-renders it with full
//! detail when running in development.

use std::any::Any;

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use tenantgate_core::error::{ClientCode, GateError};

use crate::config::Environment;

/// Message shown instead of server-side detail in production.
pub const GENERIC_SERVER_ERROR: &str = "Server Error";
pub const NOT_FOUND: &str = "Not Found";

#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    code: ClientCode,
    message: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code_for(status),
            message: message.into(),
            detail: None,
        }
    }

    /// Attach diagnostic detail (only ever shown outside production).
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Build from a caught handler panic.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let detail = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "handler panicked".to_string()
        };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "handler panicked").with_detail(detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> ClientCode {
        self.code
    }

    /// Operator log line for this error.
    pub fn log(&self) {
        if self.status.is_server_error() {
            tracing::error!(
                status = self.status.as_u16(),
                code = self.code.as_str(),
                error = %self.message,
                detail = self.detail.as_deref().unwrap_or(""),
                "request failed"
            );
        } else {
            tracing::debug!(
                status = self.status.as_u16(),
                code = self.code.as_str(),
                error = %self.message,
                "request rejected"
            );
        }
    }

    /// `{success:false, error, stack?}`.
    ///
    /// In production, 5xx messages are replaced by [`GENERIC_SERVER_ERROR`]
    /// and `stack` is never present.
    pub fn render(&self, env: Environment) -> Response {
        let development = env == Environment::Development;
        let message = if development || !self.status.is_server_error() {
            self.message.as_str()
        } else {
            GENERIC_SERVER_ERROR
        };

        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(false));
        body.insert("error".into(), json!(message));
        if development {
            if let Some(detail) = &self.detail {
                body.insert("stack".into(), json!(detail));
            }
        }

        (self.status, Json(Value::Object(body))).into_response()
    }
}

fn code_for(status: StatusCode) -> ClientCode {
    match status {
        StatusCode::NOT_FOUND => ClientCode::NotFound,
        StatusCode::CONFLICT => ClientCode::Conflict,
        s if s.is_client_error() => ClientCode::BadRequest,
        _ => ClientCode::Internal,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut res = self.render(Environment::Production);
        res.extensions_mut().insert(self);
        res
    }
}

/// Server-side errors keep their debug form as `stack`; client errors carry
/// only their message.
impl From<GateError> for ApiError {
    fn from(e: GateError) -> Self {
        let code = e.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Conflict => StatusCode::CONFLICT,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::Storage | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &e {
            GateError::BadRequest(m) | GateError::Conflict(m) => m.clone(),
            GateError::NotFound => NOT_FOUND.to_string(),
            other => other.to_string(),
        };
        let err = Self {
            status,
            code,
            message,
            detail: None,
        };
        if status.is_server_error() {
            err.with_detail(format!("{e:?}"))
        } else {
            err
        }
    }
}

/// Body extraction failures (oversized, unreadable) keep their status.
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

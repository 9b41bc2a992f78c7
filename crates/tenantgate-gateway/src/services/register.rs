//! User registration workflow.
//!
//! validate -> (invalid: 400) | hash -> store.create -> 201 | 409 | 500
//!
//! Every non-success exit builds its body through [`RegisterOutcome::rejected`],
//! which echoes the caller's input only after redacting secrets. The success
//! body carries `id` and `email` and nothing else. No lock is held and no
//! shared state is touched while the store call is awaited.

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use tenantgate_core::error::{ClientCode, GateError, Result};
use tenantgate_core::{redact_secrets, FieldConstraint, Schema, ValidationOutcome};

use crate::config::RegistrationPolicy;
use crate::context::TenantContext;
use crate::error::ApiError;
use crate::services::password::hash_password;
use crate::services::store::{NewUser, UserRecord};

pub const DUPLICATE_EMAIL: &str = "Email already registered";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Registration schema for one tenant.
pub fn registration_schema(policy: &RegistrationPolicy) -> Result<Schema> {
    Schema::builder("register")
        .field("email", FieldConstraint::email(1, 255).required())
        .field("email2", FieldConstraint::compare("email").required())
        .field(
            "password",
            FieldConstraint::password(policy.password_min, policy.password_max).required(),
        )
        .field("password2", FieldConstraint::compare("password").required())
        .field("firstname", FieldConstraint::string(1, 20).required())
        .field("lastname", FieldConstraint::string(1, 20).required())
        .build()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStatus {
    Created,
    Invalid,
    Conflict,
    Failed,
}

impl RegisterStatus {
    pub fn http_status(self) -> StatusCode {
        match self {
            RegisterStatus::Created => StatusCode::CREATED,
            RegisterStatus::Invalid => StatusCode::BAD_REQUEST,
            RegisterStatus::Conflict => StatusCode::CONFLICT,
            RegisterStatus::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{success, data, errors}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEnvelope {
    pub success: bool,
    pub data: Value,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterOutcome {
    pub status: RegisterStatus,
    pub body: ApiEnvelope,
}

impl RegisterOutcome {
    fn created(user: &UserRecord) -> Self {
        Self {
            status: RegisterStatus::Created,
            body: ApiEnvelope {
                success: true,
                data: json!({ "id": user.id, "email": user.email }),
                errors: Vec::new(),
            },
        }
    }

    /// The only constructor for failure bodies.
    fn rejected(status: RegisterStatus, input: &Value, errors: Vec<String>) -> Self {
        Self {
            status,
            body: ApiEnvelope {
                success: false,
                data: redact_secrets(input),
                errors,
            },
        }
    }
}

impl IntoResponse for RegisterOutcome {
    fn into_response(self) -> Response {
        (self.status.http_status(), Json(self.body)).into_response()
    }
}

/// Run the workflow for one (already parsed) request body.
pub async fn register_user(tenant: &TenantContext, input: &Value) -> RegisterOutcome {
    let outcome = tenant.registration_schema().validate(input);
    if !outcome.is_valid() {
        tracing::debug!(errors = outcome.errors.len(), "registration rejected by schema");
        return RegisterOutcome::rejected(RegisterStatus::Invalid, input, outcome.errors);
    }

    let new_user = match new_user(&outcome).await {
        Ok(u) => u,
        Err(e) => {
            tracing::error!(tenant = %tenant.id(), error = %e, "registration failed before store");
            return RegisterOutcome::rejected(
                RegisterStatus::Failed,
                input,
                vec![REGISTRATION_FAILED.to_string()],
            );
        }
    };

    let user = match tenant.users().create(new_user).await {
        Ok(user) => user,
        Err(e) => {
            let err = GateError::from(e);
            return match err.client_code() {
                ClientCode::Conflict => {
                    tracing::info!(tenant = %tenant.id(), "registration for existing email");
                    RegisterOutcome::rejected(
                        RegisterStatus::Conflict,
                        input,
                        vec![DUPLICATE_EMAIL.to_string()],
                    )
                }
                code => {
                    tracing::error!(
                        tenant = %tenant.id(),
                        code = code.as_str(),
                        error = %err,
                        "user store create failed"
                    );
                    RegisterOutcome::rejected(
                        RegisterStatus::Failed,
                        input,
                        vec![REGISTRATION_FAILED.to_string()],
                    )
                }
            };
        }
    };

    tracing::info!(tenant = %tenant.id(), user_id = %user.id, "user registered");
    RegisterOutcome::created(&user)
}

async fn new_user(outcome: &ValidationOutcome) -> Result<NewUser> {
    let field = |name: &str| {
        outcome
            .text(name)
            .map(str::to_owned)
            .ok_or_else(|| GateError::Internal(format!("validated field missing: {name}")))
    };

    let email = field("email")?;
    let firstname = field("firstname")?;
    let lastname = field("lastname")?;
    let password = field("password")?;

    // Argon2 is CPU-bound; keep it off the async workers.
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| GateError::Internal(format!("hash task failed: {e}")))??;

    Ok(NewUser {
        email,
        password_hash,
        firstname,
        lastname,
    })
}

/// `POST /register`. A body that is not valid JSON is validated as `{}`.
///
/// A body that cannot be buffered (over the size limit, broken stream) is
/// answered with the JSON error shape and the extractor's status.
pub async fn register(
    Extension(tenant): Extension<TenantContext>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };
    let input: Value =
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::Object(Map::new()));
    register_user(&tenant, &input).await.into_response()
}

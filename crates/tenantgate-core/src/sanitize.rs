//! Secret redaction for echoed request bodies.
//!
//! Every response path that returns caller input goes through
//! [`redact_secrets`], so a new branch cannot forget to strip secrets.

use serde_json::{Map, Value};

/// Keys that must never be echoed back to a caller or written to logs.
pub const SECRET_FIELDS: &[&str] = &["password", "password2"];

/// Return a copy of `input` with all [`SECRET_FIELDS`] removed.
///
/// Non-object input redacts to an empty object. Idempotent.
pub fn redact_secrets(input: &Value) -> Value {
    redact(input, SECRET_FIELDS)
}

/// Return a copy of `input` without the given top-level keys.
pub fn redact(input: &Value, secret_fields: &[&str]) -> Value {
    let mut out: Map<String, Value> = input.as_object().cloned().unwrap_or_default();
    for key in secret_fields {
        out.remove(*key);
    }
    Value::Object(out)
}

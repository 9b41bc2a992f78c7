//! Secret redaction tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use tenantgate_core::redact_secrets;
use tenantgate_core::sanitize::redact;

#[test]
fn strips_password_fields_only() {
    let input = json!({
        "email": "a@b.com",
        "password": "123456789012",
        "password2": "123456789012",
        "firstname": "A"
    });
    let out = redact_secrets(&input);
    assert_eq!(out, json!({ "email": "a@b.com", "firstname": "A" }));
    // input untouched
    assert!(input.get("password").is_some());
}

#[test]
fn idempotent() {
    let input = json!({ "password": "x", "password2": "y", "lastname": "B" });
    let once = redact_secrets(&input);
    let twice = redact_secrets(&once);
    assert_eq!(once, twice);
    let obj = twice.as_object().unwrap();
    assert!(!obj.contains_key("password"));
    assert!(!obj.contains_key("password2"));
}

#[test]
fn non_object_redacts_to_empty_object() {
    assert_eq!(redact_secrets(&json!(null)), json!({}));
    assert_eq!(redact_secrets(&json!(["password"])), json!({}));
}

#[test]
fn custom_field_list() {
    let out = redact(&json!({ "token": "t", "id": 1 }), &["token"]);
    assert_eq!(out, json!({ "id": 1 }));
}

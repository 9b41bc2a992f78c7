#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tenantgate_gateway::services::password::{hash_password, verify_password};

#[test]
fn hash_and_verify() {
    let hash = hash_password("correct horse battery").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("correct horse battery", &hash));
    assert!(!verify_password("wrong horse battery", &hash));
}

#[test]
fn salts_differ() {
    let a = hash_password("same-secret-value").unwrap();
    let b = hash_password("same-secret-value").unwrap();
    assert_ne!(a, b);
}

#[test]
fn garbage_hash_never_verifies() {
    assert!(!verify_password("x", "not a phc string"));
}

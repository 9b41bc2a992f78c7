//! User-store seam.
//!
//! The registration workflow only needs `create`. Uniqueness of `email` is the
//! store's job and is reported as [`StoreError::DuplicateKey`].

use std::fmt;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tenantgate_core::GateError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<StoreError> for GateError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey { key } => GateError::Conflict(format!("duplicate key: {key}")),
            StoreError::Storage(m) => GateError::Storage(m),
        }
    }
}

/// Record to insert. `password_hash` is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .finish()
    }
}

#[derive(Clone)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;
}

/// Process-local store keyed by email. Suitable for development and tests.
#[derive(Default)]
pub struct MemoryUserStore {
    by_email: DashMap<String, UserRecord>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            by_email: DashMap::new(),
        }
    }

    pub fn get(&self, email: &str) -> Option<UserRecord> {
        self.by_email.get(email).map(|r| r.value().clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        // entry() holds the shard lock, so check-and-insert is atomic
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey { key: "email".into() }),
            Entry::Vacant(slot) => {
                let record = UserRecord {
                    id: Uuid::new_v4().to_string(),
                    email: user.email,
                    password_hash: user.password_hash,
                    firstname: user.firstname,
                    lastname: user.lastname,
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}

//! Request-handling services.
//!
//! - `store`: the user-store seam and the bundled in-memory store
//! - `password`: Argon2 hashing for validated secrets
//! - `register`: the registration workflow and its HTTP handler

pub mod password;
pub mod register;
pub mod store;

pub use register::{register_user, RegisterOutcome, RegisterStatus};
pub use store::{MemoryUserStore, NewUser, StoreError, UserRecord, UserStore};

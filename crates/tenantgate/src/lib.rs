//! Top-level facade crate for tenantgate.
//!
//! Re-exports the validation core and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use tenantgate_core::*;
}

pub mod gateway {
    pub use tenantgate_gateway::*;
}

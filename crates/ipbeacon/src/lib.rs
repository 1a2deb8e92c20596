//! Top-level facade crate for ipbeacon.
//!
//! Re-exports the domain types and the server library so users can depend on a single crate.

pub mod core {
    pub use ipbeacon_core::*;
}

pub mod server {
    pub use ipbeacon_server::*;
}

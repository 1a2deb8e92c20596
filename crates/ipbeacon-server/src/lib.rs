//! ipbeacon server library entry.
//!
//! Wires config, the record store, the clock, and the Update-and-Report
//! service into an axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod clock;
pub mod config;
pub mod http;
pub mod router;
pub mod service;
pub mod store;

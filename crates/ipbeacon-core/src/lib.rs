//! ipbeacon core: the persisted record, its wire encoding, report rendering,
//! and the error surface shared with the server.
//!
//! Carries no transport or runtime dependencies so the same record format can
//! be read by tooling outside the server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Undecodable stored
//! values surface as `BeaconError::Corrupt` instead of crashing a request.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod record;
pub mod report;

/// Shared result type.
pub use error::{BeaconError, Result};
pub use record::{IpRecord, SLOT_KEY};

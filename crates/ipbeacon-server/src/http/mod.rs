//! HTTP surface: handlers and error mapping.

pub mod handlers;
pub mod response;

pub use handlers::{fetch_report, route_not_found, submit_update};
pub use response::{ApiError, NO_CACHE_HEADERS};

//! Shared error type across ipbeacon crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Update body is not well-formed JSON.
    MalformedRequest,
    /// Shared secret mismatch or missing ip.
    Unauthorized,
    /// No record has been stored yet.
    NotFound,
    /// Unknown method/path.
    RouteNotFound,
    /// Record store failed.
    StoreUnavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MalformedRequest => "MALFORMED_REQUEST",
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::RouteNotFound => "ROUTE_NOT_FOUND",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BeaconError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("unauthorized or missing ip")]
    Unauthorized,
    #[error("ip not set")]
    NotFound,
    #[error("route not found")]
    RouteNotFound,
    #[error("store: {0}")]
    Store(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl BeaconError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BeaconError::MalformedRequest(_) => ClientCode::MalformedRequest,
            BeaconError::Unauthorized => ClientCode::Unauthorized,
            BeaconError::NotFound => ClientCode::NotFound,
            BeaconError::RouteNotFound => ClientCode::RouteNotFound,
            BeaconError::Store(_) => ClientCode::StoreUnavailable,
            BeaconError::Corrupt(_) | BeaconError::Config(_) | BeaconError::Internal(_) => {
                ClientCode::Internal
            }
        }
    }

    /// True when the request itself was at fault, as opposed to the store or
    /// the server.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            BeaconError::MalformedRequest(_)
                | BeaconError::Unauthorized
                | BeaconError::NotFound
                | BeaconError::RouteNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_internal_failures_are_not_client_faults() {
        assert!(BeaconError::MalformedRequest("x".into()).is_client_fault());
        assert!(BeaconError::Unauthorized.is_client_fault());
        assert!(!BeaconError::Store("down".into()).is_client_fault());
        assert!(!BeaconError::Corrupt("bad".into()).is_client_fault());
        assert!(!BeaconError::Internal("bind".into()).is_client_fault());
    }
}

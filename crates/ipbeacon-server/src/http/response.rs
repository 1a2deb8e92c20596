//! Error -> HTTP mapping and shared response headers.

use axum::{
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};

use ipbeacon_core::error::BeaconError;

/// Headers attached to every report response, found or not.
pub const NO_CACHE_HEADERS: [(HeaderName, &str); 4] = [
    (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
    (
        header::CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, proxy-revalidate",
    ),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

/// Newtype so core errors can be returned straight from handlers.
#[derive(Debug)]
pub struct ApiError(pub BeaconError);

impl From<BeaconError> for ApiError {
    fn from(e: BeaconError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code().as_str();
        match &self.0 {
            BeaconError::MalformedRequest(_) => (StatusCode::BAD_REQUEST, "Bad JSON").into_response(),
            BeaconError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized or missing ip").into_response()
            }
            BeaconError::NotFound => {
                (StatusCode::NOT_FOUND, NO_CACHE_HEADERS, "IP not set").into_response()
            }
            BeaconError::RouteNotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            BeaconError::Store(_) => {
                tracing::error!(error = %self.0, code, "record store failed");
                (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable").into_response()
            }
            BeaconError::Corrupt(_) | BeaconError::Config(_) | BeaconError::Internal(_) => {
                tracing::error!(error = %self.0, code, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use ipbeacon_core::error::BeaconError;

use crate::app_state::AppState;
use crate::http::response::{ApiError, NO_CACHE_HEADERS};

/// `POST /update`
///
/// The body is read raw so a missing or wrong `Content-Type` does not matter;
/// only the JSON itself is judged. Unreadable or oversized bodies count as
/// malformed.
pub async fn submit_update(
    State(app): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body.map_err(|e| BeaconError::MalformedRequest(e.body_text()))?;

    match app.service().submit(&body).await {
        Ok(record) => {
            tracing::info!(ip = %record.ip, key = app.service().slot_key(), "ip updated");
            Ok((StatusCode::OK, "OK").into_response())
        }
        Err(e) => {
            // Server-side failures are logged once by `ApiError`.
            if e.is_client_fault() {
                tracing::warn!(code = e.client_code().as_str(), error = %e, "update rejected");
            }
            Err(e.into())
        }
    }
}

/// `GET /`
pub async fn fetch_report(State(app): State<AppState>) -> Result<Response, ApiError> {
    let body = app.service().fetch().await?;
    Ok((StatusCode::OK, NO_CACHE_HEADERS, body).into_response())
}

/// Every other method/path, including the wrong method on a known path.
pub async fn route_not_found() -> ApiError {
    ApiError(BeaconError::RouteNotFound)
}

//! Axum router wiring.
//!
//! Exactly two routes: `POST /update` and `GET /`. Anything else, including a
//! wrong method on either path, answers 404 rather than 405. HEAD is routed
//! explicitly since axum would otherwise hand it to the GET handler.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, http};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes();
    Router::new()
        .route(
            "/update",
            post(http::submit_update).fallback(http::route_not_found),
        )
        .route(
            "/",
            get(http::fetch_report)
                .head(http::route_not_found)
                .fallback(http::route_not_found),
        )
        .fallback(http::route_not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

//! API route configuration.

use crate::api::handlers::{shorten_handler, url_info_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Version 1 API routes, mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create (or fetch) the short code for a URL
/// - `GET  /url/{short}`  - Stored record for a short code, with click count
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/url/{short}", get(url_info_handler))
}

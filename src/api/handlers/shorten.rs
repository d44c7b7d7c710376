//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short code for a URL.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_url": "Ab3dE9" }
/// ```
///
/// Submitting the same URL again returns the same code.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or not an absolute URL.
/// Returns 500 Internal Server Error on store failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let short_url = state.link_service.create_short_url(&payload.url).await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse { short_url })))
}

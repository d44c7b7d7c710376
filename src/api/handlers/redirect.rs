//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short}`
///
/// # Request Flow
///
/// 1. Resolve the code through the link service
/// 2. The service hands the click to the background worker (fire-and-forget)
/// 3. Return 302 Found with the original URL in `Location` (ASCII-serialized)
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error on store failures.
pub async fn redirect_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original = state.link_service.redirect(&short).await?;
    debug!("Redirecting {} to {}", short, original);

    let location = location_header(&original).ok_or_else(|| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "short_url": short }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// Builds a `Location` value from a stored URL.
///
/// The URL is re-serialized so that non-ASCII hosts become punycode and
/// non-ASCII path or query bytes are percent-encoded.
fn location_header(original: &str) -> Option<HeaderValue> {
    let url = Url::parse(original).ok()?;
    HeaderValue::try_from(url.as_str()).ok()
}

//! Handler for link info endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::url_info::UrlInfoResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record for a short code, including its click count.
///
/// # Endpoint
///
/// `GET /api/v1/url/{short}`
///
/// Does not count as a click.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn url_info_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlInfoResponse>, AppError> {
    let link = state.link_service.get_link(&short).await?;

    Ok(Json(link.into()))
}

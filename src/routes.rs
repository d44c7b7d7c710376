//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: store and click queue
//! - `/api/v1/*`         - REST API
//! - `GET  /{short}`     - Short link redirect
//!
//! With a web directory, every other `GET` path is looked up in it first
//! (`/` serves `index.html`, `/script.js` serves the script) and paths with no
//! matching file fall through to the redirect. Without one, `/` lists the API
//! endpoints.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::handlers::{api_index_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `web_dir` - directory holding the static frontend; `None` serves the API only
pub fn app_router(state: AppState, web_dir: Option<&Path>) -> NormalizePath<Router> {
    let api = Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api::routes::v1_routes());

    let router: Router = match web_dir {
        Some(dir) => {
            let redirects = redirect_routes().with_state(state.clone());
            api.with_state(state)
                .fallback_service(ServeDir::new(dir).fallback(redirects))
        }
        None => api
            .route("/", get(api_index_handler))
            .merge(redirect_routes())
            .with_state(state),
    };

    let router = router.layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn redirect_routes() -> Router<AppState> {
    Router::new().route("/{short}", get(redirect_handler))
}

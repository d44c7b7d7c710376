//! Landing page served when no frontend directory is deployed.

use axum::response::Html;

const API_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>urlcutter API</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
        .endpoint { background: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 5px; }
        .method { font-weight: bold; color: #007bff; }
    </style>
</head>
<body>
    <h1>urlcutter API</h1>
    <p>The API server is running. Set <code>WEB_DIR</code> to a directory with frontend files to serve a web interface.</p>
    <div class="endpoint"><span class="method">POST</span> /api/v1/shorten - Create a short link</div>
    <div class="endpoint"><span class="method">GET</span> /api/v1/url/{short} - Show a stored link</div>
    <div class="endpoint"><span class="method">GET</span> /{short} - Redirect to the original URL</div>
    <div class="endpoint"><span class="method">GET</span> /health - Service health</div>
</body>
</html>
"#;

/// Lists the API endpoints.
///
/// # Endpoint
///
/// `GET /` (API-only deployments)
pub async fn api_index_handler() -> Html<&'static str> {
    Html(API_INDEX)
}

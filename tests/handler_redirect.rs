mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;
use urlcutter::api::handlers::{redirect_handler, shorten_handler};
use urlcutter::domain::repositories::LinkRepository;
use urlcutter::routes::app_router;

#[tokio::test]
async fn test_redirect_success() {
    let (state, repo, _rx) = common::create_test_state();
    common::create_test_link(repo.as_ref(), "Ab3dE9", "https://example.com/target").await;

    let app = Router::new()
        .route("/{short}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/Ab3dE9").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header(header::LOCATION),
        "https://example.com/target"
    );
}

#[tokio::test]
async fn test_redirect_enqueues_click() {
    let (state, repo, mut rx) = common::create_test_state();
    common::create_test_link(repo.as_ref(), "click1", "https://example.com").await;

    let app = Router::new()
        .route("/{short}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    server.get("/click1").await.assert_status(StatusCode::FOUND);

    let event = rx.try_recv().unwrap();
    assert_eq!(event.code, "click1");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repo, mut rx) = common::create_test_state();
    let app = Router::new()
        .route("/{short}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/nope12").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "URL not found"
    );
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_malformed_code_not_found() {
    let (state, _repo, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/{short}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    server.get("/way-too-long-code").await.assert_status_not_found();
}

#[tokio::test(start_paused = true)]
async fn test_redirect_counts_clicks_through_worker() {
    let (state, repo, worker) = common::create_test_state_with_worker();
    common::create_test_link(repo.as_ref(), "cnt123", "https://example.com/counted").await;

    let app = Router::new()
        .route("/{short}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    for _ in 0..5 {
        server.get("/cnt123").await.assert_status(StatusCode::FOUND);
    }

    let mut clicks = 0;
    for _ in 0..100 {
        clicks = repo.find_by_short("cnt123").await.unwrap().unwrap().clicks;
        if clicks == 5 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(clicks, 5);

    worker.abort();
}

#[tokio::test]
async fn test_app_router_redirect_with_trailing_slash() {
    let (state, repo, _rx) = common::create_test_state();
    common::create_test_link(repo.as_ref(), "slash1", "https://example.com/slash").await;

    let app = app_router(state, None);

    let response = app
        .oneshot(Request::builder().uri("/slash1/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/slash"
    );
}

#[tokio::test]
async fn test_redirect_unicode_url_is_percent_encoded() {
    let (state, _repo, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/api/v1/shorten", post(shorten_handler))
        .route("/{short}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let created = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "https://пример.рф/путь" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let code = created.json::<serde_json::Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{code}")).await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header(header::LOCATION),
        "https://xn--e1afmkfd.xn--p1ai/%D0%BF%D1%83%D1%82%D1%8C"
    );
}

#[tokio::test]
async fn test_urls_with_control_characters_never_become_links() {
    let (state, repo, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/api/v1/shorten", post(shorten_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    for url in [
        "https://example.com/a\nb",
        "https://exa\tmple.com/",
        " https://example.com/lead",
        "https:example.com",
    ] {
        server
            .post("/api/v1/shorten")
            .json(&json!({ "url": url }))
            .await
            .assert_status_bad_request();
    }

    assert!(repo.is_empty());
}

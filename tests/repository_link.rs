//! PostgreSQL store tests. Each test gets a fresh database with the
//! migrations applied; run with `DATABASE_URL` set and `--ignored`.

mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use urlcutter::api::handlers::redirect_handler;
use urlcutter::domain::entities::NewLink;
use urlcutter::domain::error::StoreError;
use urlcutter::domain::repositories::LinkRepository;
use urlcutter::infrastructure::persistence::PgLinkRepository;

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(NewLink::new("test12", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.id, "test12");
    assert_eq!(link.short, "test12");
    assert_eq!(link.original, "https://example.com");
    assert_eq!(link.clicks, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_short(pool: PgPool) {
    common::create_pg_test_link(&pool, "abc123", "https://example.com").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.find_by_short("abc123").await.unwrap();

    assert_eq!(link.unwrap().original, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_short_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.find_by_short("nope00").await.unwrap();

    assert!(link.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_original(pool: PgPool) {
    common::create_pg_test_link(&pool, "orig01", "https://example.com/original").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let found = repo
        .find_by_original("https://example.com/original")
        .await
        .unwrap();
    assert_eq!(found.unwrap().short, "orig01");

    let missing = repo
        .find_by_original("https://example.com/original/")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_code_rejected(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(NewLink::new("dup123", "https://example.com/a"))
        .await
        .unwrap();

    let result = repo
        .create(NewLink::new("dup123", "https://example.com/b"))
        .await;

    assert!(matches!(result, Err(StoreError::DuplicateCode)));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_original_rejected(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(NewLink::new("first1", "https://example.com/same"))
        .await
        .unwrap();

    let result = repo
        .create(NewLink::new("secnd2", "https://example.com/same"))
        .await;

    assert!(matches!(result, Err(StoreError::DuplicateOriginal)));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_long_original_url_is_unique_indexed(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let long_url = format!("https://example.com/{}", "a".repeat(10_000));

    repo.create(NewLink::new("long01", long_url.clone()))
        .await
        .unwrap();

    let found = repo.find_by_original(&long_url).await.unwrap();
    assert_eq!(found.unwrap().short, "long01");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_empty_original_rejected(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.create(NewLink::new("empty1", "")).await;

    assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_clicks(pool: PgPool) {
    common::create_pg_test_link(&pool, "click1", "https://example.com").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.increment_clicks("click1").await.unwrap());
    assert!(repo.increment_clicks("click1").await.unwrap());

    let link = repo.find_by_short("click1").await.unwrap().unwrap();
    assert_eq!(link.clicks, 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_clicks_unknown_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(!repo.increment_clicks("ghost1").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    common::create_pg_test_link(&pool, "race01", "https://example.com").await;
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let mut handles = Vec::new();
    for _ in 0..25 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_clicks("race01").await.unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let link = repo.find_by_short("race01").await.unwrap().unwrap();
    assert_eq!(link.clicks, 25);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_redirect_over_postgres(pool: PgPool) {
    common::create_pg_test_link(&pool, "pgredi", "https://example.com/pg").await;
    let (state, mut rx) = common::create_pg_test_state(pool);

    let app = Router::new()
        .route("/{short}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/pgredi").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(rx.try_recv().unwrap().code, "pgredi");
}

#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use urlcutter::domain::click_event::ClickEvent;
use urlcutter::domain::click_worker::run_click_worker;
use urlcutter::domain::entities::NewLink;
use urlcutter::domain::repositories::LinkRepository;
use urlcutter::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use urlcutter::state::{AppState, DynLinkService};

/// State over an in-memory store, with the click queue handed back to the test.
pub fn create_test_state() -> (
    AppState,
    Arc<MemoryLinkRepository>,
    mpsc::Receiver<ClickEvent>,
) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let link_repository: Arc<dyn LinkRepository> = repo.clone();
    let link_service = Arc::new(DynLinkService::new(link_repository, tx));

    (AppState::new(link_service), repo, rx)
}

/// State over an in-memory store with a running click worker.
pub fn create_test_state_with_worker() -> (AppState, Arc<MemoryLinkRepository>, JoinHandle<()>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let link_repository: Arc<dyn LinkRepository> = repo.clone();
    let worker = tokio::spawn(run_click_worker(rx, link_repository.clone(), 4));
    let link_service = Arc::new(DynLinkService::new(link_repository, tx));

    (AppState::new(link_service), repo, worker)
}

/// State over PostgreSQL, with the click queue handed back to the test.
pub fn create_pg_test_state(pool: PgPool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(DynLinkService::new(link_repository, tx));

    (AppState::new(link_service), rx)
}

pub async fn create_test_link<L: LinkRepository + ?Sized>(repo: &L, code: &str, url: &str) {
    repo.create(NewLink::new(code, url)).await.unwrap();
}

pub async fn create_pg_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO urls (id, original_url, short_url) VALUES ($1, $2, $1)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

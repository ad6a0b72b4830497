#![allow(dead_code)]

use axum::Router;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use url_shortener::application::services::AliasService;
use url_shortener::domain::repositories::AliasRepository;
use url_shortener::infrastructure::database;
use url_shortener::infrastructure::persistence::{MemoryAliasRepository, SqliteAliasRepository};
use url_shortener::routes;
use url_shortener::state::{AppState, Credentials};
use url_shortener::utils::alias_generator::RandomAliasGenerator;

pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";

/// `Basic base64("admin:secret")`
pub const AUTH_HEADER: &str = "Basic YWRtaW46c2VjcmV0";
/// `Basic base64("admin:wrong")`
pub const WRONG_AUTH_HEADER: &str = "Basic YWRtaW46d3Jvbmc=";

/// Fresh in-memory database with migrations applied.
///
/// A single connection that never expires keeps the database alive for the
/// whole test.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    database::migrate(&pool).await.unwrap();

    pool
}

pub async fn insert_alias(pool: &SqlitePool, alias: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO url (target_url, alias) VALUES (?, ?) RETURNING id")
        .bind(url)
        .bind(alias)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    let repository = Arc::new(SqliteAliasRepository::new(Arc::new(pool)));
    state_with_repository(repository)
}

pub fn create_memory_state() -> AppState {
    state_with_repository(Arc::new(MemoryAliasRepository::new()))
}

fn state_with_repository(repository: Arc<dyn AliasRepository>) -> AppState {
    let alias_service = Arc::new(AliasService::new(
        repository,
        Arc::new(RandomAliasGenerator::default()),
        5,
    ));

    AppState::new(
        alias_service,
        Credentials {
            user: TEST_USER.to_string(),
            password: TEST_PASSWORD.to_string(),
        },
    )
}

pub fn test_app(state: AppState) -> Router {
    routes::router(state, Duration::from_secs(4))
}

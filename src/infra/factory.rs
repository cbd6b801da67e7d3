use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::payments::http_checkout_gateway::HttpCheckoutGateway;
use crate::infra::rooms::http_room_service::HttpRoomService;
use crate::infra::repositories::{
    postgres_availability_repo::PostgresAvailabilityRepo, postgres_cart_repo::PostgresCartRepo,
    postgres_catalog_repo::PostgresCatalogRepo, postgres_credit_repo::PostgresCreditRepo,
    postgres_lesson_repo::PostgresLessonRepo,
    sqlite_availability_repo::SqliteAvailabilityRepo, sqlite_cart_repo::SqliteCartRepo,
    sqlite_catalog_repo::SqliteCatalogRepo, sqlite_credit_repo::SqliteCreditRepo,
    sqlite_lesson_repo::SqliteLessonRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let checkout_gateway = Arc::new(HttpCheckoutGateway::new(
        config.checkout_service_url.clone(),
        config.checkout_service_token.clone(),
    ));
    let room_service = Arc::new(HttpRoomService::new(
        config.room_service_url.clone(),
        config.room_service_token.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            catalog_repo: Arc::new(PostgresCatalogRepo::new(pool.clone())),
            availability_repo: Arc::new(PostgresAvailabilityRepo::new(pool.clone())),
            lesson_repo: Arc::new(PostgresLessonRepo::new(pool.clone())),
            cart_repo: Arc::new(PostgresCartRepo::new(pool.clone())),
            credit_repo: Arc::new(PostgresCreditRepo::new(pool.clone())),
            checkout_gateway,
            room_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            catalog_repo: Arc::new(SqliteCatalogRepo::new(pool.clone())),
            availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
            lesson_repo: Arc::new(SqliteLessonRepo::new(pool.clone())),
            cart_repo: Arc::new(SqliteCartRepo::new(pool.clone())),
            credit_repo: Arc::new(SqliteCreditRepo::new(pool.clone())),
            checkout_gateway,
            room_service,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}

use tutoring_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_availability_repo::SqliteAvailabilityRepo,
        sqlite_cart_repo::SqliteCartRepo,
        sqlite_catalog_repo::SqliteCatalogRepo,
        sqlite_credit_repo::SqliteCreditRepo,
        sqlite_lesson_repo::SqliteLessonRepo,
    },
    domain::models::checkout::{CheckoutSession, CheckoutSessionRequest},
    domain::ports::{CheckoutGateway, RoomService},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub enum GatewayMode {
    Succeed,
    Conflict,
}

pub struct MockCheckoutGateway {
    mode: GatewayMode,
}

#[async_trait]
impl CheckoutGateway for MockCheckoutGateway {
    async fn initiate_checkout(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, AppError> {
        match self.mode {
            GatewayMode::Succeed => Ok(CheckoutSession {
                success: true,
                checkout_url: "https://pay.example/session/mock".to_string(),
                session_id: Uuid::new_v4().to_string(),
                total_amount: request.bookings.iter().map(|b| b.price).sum(),
            }),
            GatewayMode::Conflict => Err(AppError::Conflict("Selected slot is no longer available".to_string())),
        }
    }
}

pub struct MockRoomService;

#[async_trait]
impl RoomService for MockRoomService {
    async fn create_room(&self, lesson_id: &str) -> Result<String, AppError> {
        Ok(format!("https://rooms.example/{}", lesson_id))
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_gateway(GatewayMode::Succeed).await
    }

    pub async fn with_gateway(mode: GatewayMode) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            checkout_service_url: "http://localhost".to_string(),
            checkout_service_token: "token".to_string(),
            room_service_url: "http://localhost".to_string(),
            room_service_token: "token".to_string(),
            cart_ttl_minutes: 15,
            expiry_notice_minutes: 5,
            cart_sweep_interval_secs: 60,
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            catalog_repo: Arc::new(SqliteCatalogRepo::new(pool.clone())),
            availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
            lesson_repo: Arc::new(SqliteLessonRepo::new(pool.clone())),
            cart_repo: Arc::new(SqliteCartRepo::new(pool.clone())),
            credit_repo: Arc::new(SqliteCreditRepo::new(pool.clone())),
            checkout_gateway: Arc::new(MockCheckoutGateway { mode }),
            room_service: Arc::new(MockRoomService),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

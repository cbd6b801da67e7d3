use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub checkout_service_url: String,
    pub checkout_service_token: String,
    pub room_service_url: String,
    pub room_service_token: String,
    pub cart_ttl_minutes: i64,
    pub expiry_notice_minutes: i64,
    pub cart_sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            checkout_service_url: env::var("CHECKOUT_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8100/api/v1/initiate-booking-checkout".to_string()),
            checkout_service_token: env::var("CHECKOUT_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            room_service_url: env::var("ROOM_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8200/api/v1/rooms".to_string()),
            room_service_token: env::var("ROOM_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            cart_ttl_minutes: env::var("CART_TTL_MINUTES").unwrap_or_else(|_| "15".to_string()).parse().expect("CART_TTL_MINUTES must be a number"),
            expiry_notice_minutes: env::var("EXPIRY_NOTICE_MINUTES").unwrap_or_else(|_| "5".to_string()).parse().expect("EXPIRY_NOTICE_MINUTES must be a number"),
            cart_sweep_interval_secs: env::var("CART_SWEEP_INTERVAL_SECS").unwrap_or_else(|_| "60".to_string()).parse().expect("CART_SWEEP_INTERVAL_SECS must be a number"),
        }
    }
}

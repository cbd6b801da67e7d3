use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A reserved-but-unpurchased lesson slot. Owned by exactly one learner and
/// invisible to reads once `expires_at` has passed.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CartItem {
    pub id: String,
    pub learner_id: String,
    pub tutor_id: String,
    pub subject_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i64,
    pub price_pence: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub struct NewCartItemParams {
    pub learner_id: String,
    pub tutor_id: String,
    pub subject_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i64,
    pub price_pence: i64,
}

impl CartItem {
    pub fn new(params: NewCartItemParams, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            learner_id: params.learner_id,
            tutor_id: params.tutor_id,
            subject_id: params.subject_id,
            start_time: params.start_time,
            duration_min: params.duration_min,
            price_pence: params.price_pence,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }
}

/// A cart item joined with its tutor and subject display names.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct CartItemDetail {
    pub id: String,
    pub learner_id: String,
    pub tutor_id: String,
    pub subject_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i64,
    pub price_pence: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub tutor_name: String,
    pub subject_name: String,
}

/// Derived on every cart read, never stored.
#[derive(Debug, Serialize, Clone)]
pub struct CartSummary {
    pub items: Vec<CartItemDetail>,
    pub subtotal_pence: i64,
    pub discount_pence: i64,
    pub final_price_pence: i64,
}

/// Transient warning that a reservation is about to lapse. Dismissal state
/// lives with the caller and is passed back in on each read.
#[derive(Debug, Serialize, Clone)]
pub struct ExpiryNotification {
    pub id: String,
    pub tutor_name: String,
    pub start_time: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

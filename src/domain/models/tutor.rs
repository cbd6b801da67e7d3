use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tutor {
    pub id: String,
    pub display_name: String,
    pub timezone: String,
    pub hourly_rate_pence: i64,
    pub created_at: DateTime<Utc>,
}

impl Tutor {
    pub fn new(display_name: String, timezone: String, hourly_rate_pence: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            display_name,
            timezone,
            hourly_rate_pence,
            created_at: Utc::now(),
        }
    }

    /// Price of a single slot at this tutor's rate. Rates are quoted per
    /// hour; a 30-minute slot costs half the hourly rate.
    pub fn slot_price_pence(&self, duration_min: i64) -> i64 {
        self.hourly_rate_pence * duration_min / 60
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

pub const STATUS_CONFIRMED: &str = "CONFIRMED";
pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// A confirmed booking between a learner and a tutor. Any non-cancelled
/// lesson blocks its time range for new bookings.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Lesson {
    pub id: String,
    pub tutor_id: String,
    pub learner_id: String,
    pub subject_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_min: i64,
    pub price_pence: i64,
    pub status: String,
    pub room_url: Option<String>,
    pub management_token: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewLessonParams {
    pub tutor_id: String,
    pub learner_id: String,
    pub subject_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i64,
    pub price_pence: i64,
}

impl Lesson {
    pub fn new(params: NewLessonParams) -> Self {
        let end_time = params.start_time + Duration::minutes(params.duration_min);

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            tutor_id: params.tutor_id,
            learner_id: params.learner_id,
            subject_id: params.subject_id,
            start_time: params.start_time,
            end_time,
            duration_min: params.duration_min,
            price_pence: params.price_pence,
            status: STATUS_CONFIRMED.to_string(),
            room_url: None,
            management_token: token,
            created_at: Utc::now(),
        }
    }
}

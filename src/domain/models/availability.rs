use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A standing weekly availability window. `day_of_week` counts from Monday
/// (0 = Monday .. 6 = Sunday). Times are tutor-local "HH:MM" wall clock.
/// An empty `subjects_json` list means the window covers any subject.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RecurringAvailability {
    pub id: String,
    pub tutor_id: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub subjects_json: String,
    pub created_at: DateTime<Utc>,
}

impl RecurringAvailability {
    pub fn new(tutor_id: String, day_of_week: i32, start_time: String, end_time: String, subjects: &[String]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tutor_id,
            day_of_week,
            start_time,
            end_time,
            subjects_json: serde_json::to_string(subjects).unwrap_or_else(|_| "[]".to_string()),
            created_at: Utc::now(),
        }
    }

    pub fn subjects(&self) -> Vec<String> {
        serde_json::from_str(&self.subjects_json).unwrap_or_default()
    }

    pub fn covers_subject(&self, subject: Option<&str>) -> bool {
        match subject {
            None => true,
            Some(wanted) => {
                let subjects = self.subjects();
                subjects.is_empty() || subjects.iter().any(|s| s == wanted)
            }
        }
    }
}

/// A date-specific availability window. One-off windows extend the recurring
/// schedule for that date; they never replace it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct OneOffAvailability {
    pub id: String,
    pub tutor_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}

impl OneOffAvailability {
    pub fn new(tutor_id: String, date: NaiveDate, start_time: String, end_time: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tutor_id,
            date,
            start_time,
            end_time,
            created_at: Utc::now(),
        }
    }
}

/// A bookable unit produced by the resolver. Recomputed on every query,
/// never persisted. Only available slots are emitted.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub start_time: DateTime<Utc>,
    pub duration_min: i64,
    pub available: bool,
}

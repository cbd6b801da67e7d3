use crate::domain::{models::availability::{OneOffAvailability, RecurringAvailability}, ports::AvailabilityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::NaiveDate;

pub struct PostgresAvailabilityRepo {
    pool: PgPool,
}

impl PostgresAvailabilityRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepo {
    async fn add_recurring(&self, rule: &RecurringAvailability) -> Result<RecurringAvailability, AppError> {
        sqlx::query_as::<_, RecurringAvailability>(
            "INSERT INTO recurring_availability (id, tutor_id, day_of_week, start_time, end_time, subjects_json, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *"
        )
            .bind(&rule.id).bind(&rule.tutor_id).bind(rule.day_of_week)
            .bind(&rule.start_time).bind(&rule.end_time).bind(&rule.subjects_json).bind(rule.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_recurring(&self, tutor_id: &str) -> Result<Vec<RecurringAvailability>, AppError> {
        sqlx::query_as::<_, RecurringAvailability>(
            "SELECT * FROM recurring_availability WHERE tutor_id = $1 ORDER BY day_of_week ASC, start_time ASC"
        )
            .bind(tutor_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_recurring(&self, tutor_id: &str, rule_id: &str) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM recurring_availability WHERE tutor_id = $1 AND id = $2")
            .bind(tutor_id).bind(rule_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Availability rule not found".into()));
        }
        Ok(())
    }

    async fn add_one_off(&self, window: &OneOffAvailability) -> Result<OneOffAvailability, AppError> {
        sqlx::query_as::<_, OneOffAvailability>(
            "INSERT INTO one_off_availability (id, tutor_id, date, start_time, end_time, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *"
        )
            .bind(&window.id).bind(&window.tutor_id).bind(window.date)
            .bind(&window.start_time).bind(&window.end_time).bind(window.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_one_off(&self, tutor_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<OneOffAvailability>, AppError> {
        sqlx::query_as::<_, OneOffAvailability>(
            "SELECT * FROM one_off_availability WHERE tutor_id = $1 AND date >= $2 AND date <= $3 ORDER BY date ASC, start_time ASC"
        )
            .bind(tutor_id).bind(start).bind(end).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_one_off(&self, tutor_id: &str, window_id: &str) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM one_off_availability WHERE tutor_id = $1 AND id = $2")
            .bind(tutor_id).bind(window_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("One-off window not found".into()));
        }
        Ok(())
    }
}

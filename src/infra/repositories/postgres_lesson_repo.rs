use crate::domain::{models::lesson::Lesson, ports::LessonRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::{DateTime, Utc};

pub struct PostgresLessonRepo {
    pool: PgPool,
}

impl PostgresLessonRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonRepository for PostgresLessonRepo {
    async fn create(&self, lesson: &Lesson) -> Result<Lesson, AppError> {
        sqlx::query_as::<_, Lesson>(
            "INSERT INTO lessons (id, tutor_id, learner_id, subject_id, start_time, end_time, duration_min, price_pence, status, room_url, management_token, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *"
        )
            .bind(&lesson.id).bind(&lesson.tutor_id).bind(&lesson.learner_id).bind(&lesson.subject_id)
            .bind(lesson.start_time).bind(lesson.end_time).bind(lesson.duration_min).bind(lesson.price_pence)
            .bind(&lesson.status).bind(&lesson.room_url).bind(&lesson.management_token).bind(lesson.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Lesson>, AppError> {
        sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_tutor_range(&self, tutor_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Lesson>, AppError> {
        sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE tutor_id = $1 AND start_time < $2 AND end_time > $3 AND status != 'CANCELLED'").bind(tutor_id).bind(end).bind(start).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_by_learner(&self, learner_id: &str) -> Result<Vec<Lesson>, AppError> {
        sqlx::query_as::<_, Lesson>("SELECT * FROM lessons WHERE learner_id = $1 ORDER BY start_time ASC").bind(learner_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn count_completed(&self, learner_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM lessons WHERE learner_id = $1 AND status = 'COMPLETED'").bind(learner_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }
    async fn set_room_url(&self, id: &str, room_url: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE lessons SET room_url = $1 WHERE id = $2").bind(room_url).bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Lesson not found".into())); }
        Ok(())
    }
}

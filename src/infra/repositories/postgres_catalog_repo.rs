use crate::domain::{models::{subject::Subject, tutor::Tutor}, ports::CatalogRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCatalogRepo {
    pool: PgPool,
}

impl PostgresCatalogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepo {
    async fn create_tutor(&self, tutor: &Tutor) -> Result<Tutor, AppError> {
        sqlx::query_as::<_, Tutor>(
            "INSERT INTO tutors (id, display_name, timezone, hourly_rate_pence, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *"
        )
            .bind(&tutor.id).bind(&tutor.display_name).bind(&tutor.timezone)
            .bind(tutor.hourly_rate_pence).bind(tutor.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_tutor(&self, id: &str) -> Result<Option<Tutor>, AppError> {
        sqlx::query_as::<_, Tutor>("SELECT * FROM tutors WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn create_subject(&self, subject: &Subject) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (id, name, created_at) VALUES ($1, $2, $3) RETURNING *"
        )
            .bind(&subject.id).bind(&subject.name).bind(subject.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_subject(&self, id: &str) -> Result<Option<Subject>, AppError> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_subjects(&self) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>("SELECT * FROM subjects ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}

use crate::domain::{models::cart::{CartItem, CartItemDetail}, ports::CartRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::{DateTime, Utc};

pub struct PostgresCartRepo {
    pool: PgPool,
}

impl PostgresCartRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepo {
    async fn insert(&self, item: &CartItem) -> Result<CartItem, AppError> {
        sqlx::query_as::<_, CartItem>(
            "INSERT INTO cart_items (id, learner_id, tutor_id, subject_id, start_time, duration_min, price_pence, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&item.id).bind(&item.learner_id).bind(&item.tutor_id).bind(&item.subject_id)
            .bind(item.start_time).bind(item.duration_min).bind(item.price_pence)
            .bind(item.created_at).bind(item.expires_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active(&self, learner_id: &str, now: DateTime<Utc>) -> Result<Vec<CartItemDetail>, AppError> {
        sqlx::query_as::<_, CartItemDetail>(
            "SELECT c.id, c.learner_id, c.tutor_id, c.subject_id, c.start_time, c.duration_min,
                    c.price_pence, c.created_at, c.expires_at,
                    t.display_name AS tutor_name, s.name AS subject_name
             FROM cart_items c
             JOIN tutors t ON t.id = c.tutor_id
             JOIN subjects s ON s.id = c.subject_id
             WHERE c.learner_id = $1 AND c.expires_at > $2
             ORDER BY c.start_time ASC"
        )
            .bind(learner_id).bind(now)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, learner_id: &str, item_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND learner_id = $2")
            .bind(item_id).bind(learner_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Cart item not found".into())); }
        Ok(())
    }

    async fn clear(&self, learner_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cart_items WHERE learner_id = $1")
            .bind(learner_id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE expires_at <= $1")
            .bind(now).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}

use crate::domain::{models::credit::CreditTransaction, ports::CreditRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{SqlitePool, Row};

pub struct SqliteCreditRepo {
    pool: SqlitePool,
}

impl SqliteCreditRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for SqliteCreditRepo {
    async fn referral_balance(&self, user_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT balance_pence FROM referral_credits WHERE user_id = ?")
            .bind(user_id).fetch_optional(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.map(|r| r.get::<i64, _>("balance_pence")).unwrap_or(0))
    }

    async fn grant_referral(&self, user_id: &str, amount_pence: i64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO referral_credits (user_id, balance_pence) VALUES (?, ?)
             ON CONFLICT(user_id) DO UPDATE SET balance_pence = balance_pence + excluded.balance_pence"
        )
            .bind(user_id).bind(amount_pence).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn debit_referral(&self, user_id: &str, amount_pence: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE referral_credits SET balance_pence = balance_pence - ? WHERE user_id = ? AND balance_pence >= ?"
        )
            .bind(amount_pence).bind(user_id).bind(amount_pence)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::Conflict("Insufficient referral balance".into()));
        }
        Ok(())
    }

    async fn lesson_credits(&self, user_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT credits FROM user_credits WHERE user_id = ?")
            .bind(user_id).fetch_optional(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.map(|r| r.get::<i64, _>("credits")).unwrap_or(0))
    }

    async fn grant_lesson_credits(&self, user_id: &str, count: i64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO user_credits (user_id, credits) VALUES (?, ?)
             ON CONFLICT(user_id) DO UPDATE SET credits = credits + excluded.credits"
        )
            .bind(user_id).bind(count).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn debit_lesson_credits(&self, user_id: &str, count: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE user_credits SET credits = credits - ? WHERE user_id = ? AND credits >= ?"
        )
            .bind(count).bind(user_id).bind(count)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::Conflict("Insufficient lesson credits".into()));
        }
        Ok(())
    }

    async fn has_transaction(&self, user_id: &str, context_hash: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM credit_transactions WHERE user_id = ? AND context_hash = ?")
            .bind(user_id).bind(context_hash).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn log_transaction(&self, tx: &CreditTransaction) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO credit_transactions (id, user_id, kind, amount_pence, lesson_count, context_hash, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&tx.id).bind(&tx.user_id).bind(&tx.kind).bind(tx.amount_pence)
            .bind(tx.lesson_count).bind(&tx.context_hash).bind(tx.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}

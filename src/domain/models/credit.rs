use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use sha2::{Digest, Sha256};

pub const KIND_LESSON_CREDIT_SPEND: &str = "LESSON_CREDIT_SPEND";
pub const KIND_REFERRAL_SPEND: &str = "REFERRAL_SPEND";

/// Best-effort bookkeeping record for a balance movement. The context hash
/// lets duplicate logs for the same checkout be skipped.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CreditTransaction {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount_pence: i64,
    pub lesson_count: i64,
    pub context_hash: String,
    pub created_at: DateTime<Utc>,
}

impl CreditTransaction {
    pub fn new(user_id: String, kind: &str, amount_pence: i64, lesson_count: i64, context_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            kind: kind.to_string(),
            amount_pence,
            lesson_count,
            context_hash,
            created_at: Utc::now(),
        }
    }
}

/// Hash of the item ids a checkout consumed, stable under ordering.
pub fn checkout_context_hash(user_id: &str, kind: &str, item_ids: &[String]) -> String {
    let mut sorted = item_ids.to_vec();
    sorted.sort();

    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(kind.as_bytes());
    for id in &sorted {
        hasher.update(id.as_bytes());
    }
    hex::encode(hasher.finalize())
}

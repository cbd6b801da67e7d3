use crate::domain::models::{
    availability::{OneOffAvailability, RecurringAvailability},
    cart::{CartItem, CartItemDetail},
    checkout::{CheckoutSession, CheckoutSessionRequest},
    credit::CreditTransaction,
    lesson::Lesson,
    subject::Subject,
    tutor::Tutor,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_tutor(&self, tutor: &Tutor) -> Result<Tutor, AppError>;
    async fn find_tutor(&self, id: &str) -> Result<Option<Tutor>, AppError>;
    async fn create_subject(&self, subject: &Subject) -> Result<Subject, AppError>;
    async fn find_subject(&self, id: &str) -> Result<Option<Subject>, AppError>;
    async fn list_subjects(&self) -> Result<Vec<Subject>, AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn add_recurring(&self, rule: &RecurringAvailability) -> Result<RecurringAvailability, AppError>;
    async fn list_recurring(&self, tutor_id: &str) -> Result<Vec<RecurringAvailability>, AppError>;
    async fn delete_recurring(&self, tutor_id: &str, rule_id: &str) -> Result<(), AppError>;
    async fn add_one_off(&self, window: &OneOffAvailability) -> Result<OneOffAvailability, AppError>;
    async fn list_one_off(&self, tutor_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<OneOffAvailability>, AppError>;
    async fn delete_one_off(&self, tutor_id: &str, window_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn create(&self, lesson: &Lesson) -> Result<Lesson, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Lesson>, AppError>;
    async fn list_by_tutor_range(&self, tutor_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Lesson>, AppError>;
    async fn list_by_learner(&self, learner_id: &str) -> Result<Vec<Lesson>, AppError>;
    async fn count_completed(&self, learner_id: &str) -> Result<i64, AppError>;
    async fn set_room_url(&self, id: &str, room_url: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn insert(&self, item: &CartItem) -> Result<CartItem, AppError>;
    async fn list_active(&self, learner_id: &str, now: DateTime<Utc>) -> Result<Vec<CartItemDetail>, AppError>;
    async fn delete(&self, learner_id: &str, item_id: &str) -> Result<(), AppError>;
    async fn clear(&self, learner_id: &str) -> Result<(), AppError>;
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

#[async_trait]
pub trait CreditRepository: Send + Sync {
    async fn referral_balance(&self, user_id: &str) -> Result<i64, AppError>;
    async fn grant_referral(&self, user_id: &str, amount_pence: i64) -> Result<(), AppError>;
    async fn debit_referral(&self, user_id: &str, amount_pence: i64) -> Result<(), AppError>;
    async fn lesson_credits(&self, user_id: &str) -> Result<i64, AppError>;
    async fn grant_lesson_credits(&self, user_id: &str, count: i64) -> Result<(), AppError>;
    async fn debit_lesson_credits(&self, user_id: &str, count: i64) -> Result<(), AppError>;
    async fn has_transaction(&self, user_id: &str, context_hash: &str) -> Result<bool, AppError>;
    async fn log_transaction(&self, tx: &CreditTransaction) -> Result<(), AppError>;
}

#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn initiate_checkout(&self, request: &CheckoutSessionRequest) -> Result<CheckoutSession, AppError>;
}

#[async_trait]
pub trait RoomService: Send + Sync {
    async fn create_room(&self, lesson_id: &str) -> Result<String, AppError>;
}

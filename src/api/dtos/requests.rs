use crate::domain::models::checkout::PaymentMethod;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateTutorRequest {
    pub display_name: String,
    pub timezone: String,
    pub hourly_rate_pence: i64,
}

#[derive(Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct AddRecurringRequest {
    pub day_of_week: i32,
    pub start: String,
    pub end: String,
    pub subjects: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct AddOneOffRequest {
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
}

#[derive(Deserialize)]
pub struct AddCartItemRequest {
    pub tutor_id: String,
    pub subject_id: String,
    pub start_time: DateTime<Utc>,
    pub duration_min: i64,
}

#[derive(Deserialize)]
pub struct CheckoutQuoteRequest {
    pub promo_code: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub promo_code: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

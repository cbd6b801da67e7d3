use crate::domain::models::availability::{OneOffAvailability, RecurringAvailability, TimeSlot};
use crate::domain::models::cart::{CartItemDetail, ExpiryNotification};
use crate::domain::models::lesson::Lesson;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub week_start: String,
    pub duration_min: i64,
    pub slots: Vec<TimeSlot>,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub recurring: Vec<RecurringAvailability>,
    pub one_off: Vec<OneOffAvailability>,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItemDetail>,
    pub subtotal_pence: i64,
    pub discount_pence: i64,
    pub final_price_pence: i64,
    pub expiring: Vec<ExpiryNotification>,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutResponse {
    ZeroCharge { lessons: Vec<Lesson> },
    Credits { lessons: Vec<Lesson>, credits_spent: i64 },
    Redirect { checkout_url: String, session_id: String, total_amount_pence: i64 },
}

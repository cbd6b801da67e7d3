use serde::{Deserialize, Serialize};

/// How the learner settles the payable amount. Credits are the default when
/// the balance covers the whole cart.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Credits,
}

/// One line of the external checkout session request.
#[derive(Debug, Serialize, Clone)]
pub struct BookingLine {
    pub tutor_id: String,
    pub subject_id: String,
    pub date: String,
    pub time: String,
    pub subject: String,
    pub duration: i64,
    pub price: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct CheckoutSessionRequest {
    pub learner_id: String,
    pub bookings: Vec<BookingLine>,
    pub metadata: serde_json::Value,
}

/// Response schema of the external checkout collaborator, validated at the
/// boundary. Missing fields fail deserialization instead of propagating.
#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutSession {
    pub success: bool,
    pub checkout_url: String,
    pub session_id: String,
    pub total_amount: i64,
}

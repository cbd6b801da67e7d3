use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{availability, cart, catalog, checkout, health, lessons, schedule};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Catalog
        .route("/api/v1/tutors", post(catalog::create_tutor))
        .route("/api/v1/tutors/{tutor_id}", get(catalog::get_tutor))
        .route("/api/v1/subjects", post(catalog::create_subject).get(catalog::list_subjects))

        // Tutor Schedule Management
        .route("/api/v1/tutors/{tutor_id}/schedule", get(schedule::get_schedule).post(schedule::add_recurring))
        .route("/api/v1/tutors/{tutor_id}/schedule/one-off", post(schedule::add_one_off))
        .route("/api/v1/tutors/{tutor_id}/schedule/one-off/{window_id}", delete(schedule::delete_one_off))
        .route("/api/v1/tutors/{tutor_id}/schedule/{rule_id}", delete(schedule::delete_recurring))

        // Public Slot Discovery
        .route("/api/v1/tutors/{tutor_id}/slots", get(availability::get_week_slots))

        // Cart
        .route("/api/v1/cart", get(cart::get_cart).post(cart::add_to_cart).delete(cart::clear_cart))
        .route("/api/v1/cart/{item_id}", delete(cart::remove_cart_item))

        // Checkout
        .route("/api/v1/checkout/quote", post(checkout::quote))
        .route("/api/v1/checkout", post(checkout::checkout))

        // Booked Lessons
        .route("/api/v1/lessons", get(lessons::list_my_lessons))
        .route("/api/v1/lessons/{lesson_id}", get(lessons::get_lesson))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}

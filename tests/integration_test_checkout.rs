mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{GatewayMode, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;
use tutoring_backend::domain::models::lesson::{Lesson, NewLessonParams, STATUS_COMPLETED};

const LEARNER: &str = "learner-1";

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed_catalog(app: &TestApp, rate_pence: i64) -> (String, String) {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/tutors")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "display_name": "Checkout Tutor",
                "timezone": "UTC",
                "hourly_rate_pence": rate_pence
            }).to_string())).unwrap()
    ).await.unwrap();
    let tutor_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/subjects")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"name": "Maths"}).to_string())).unwrap()
    ).await.unwrap();
    let subject_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    (tutor_id, subject_id)
}

async fn fill_cart(app: &TestApp, tutor_id: &str, subject_id: &str, count: i64, duration: i64) {
    let base = Utc::now() + Duration::days(3);
    for i in 0..count {
        let res = app.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/cart")
                .header("X-User-Id", LEARNER)
                .header("Content-Type", "application/json")
                .body(Body::from(json!({
                    "tutor_id": tutor_id,
                    "subject_id": subject_id,
                    "start_time": (base + Duration::hours(i)).to_rfc3339(),
                    "duration_min": duration
                }).to_string())).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}

async fn post_json(app: &TestApp, uri: &str, body: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header("X-User-Id", LEARNER)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string())).unwrap()
    ).await.unwrap()
}

async fn seed_completed_lesson(app: &TestApp, tutor_id: &str, subject_id: &str) {
    let mut lesson = Lesson::new(NewLessonParams {
        tutor_id: tutor_id.to_string(),
        learner_id: LEARNER.to_string(),
        subject_id: subject_id.to_string(),
        start_time: Utc::now() - Duration::days(7),
        duration_min: 60,
        price_pence: 1500,
    });
    lesson.status = STATUS_COMPLETED.to_string();
    app.state.lesson_repo.create(&lesson).await.unwrap();
}

#[tokio::test]
async fn test_quote_applies_referral_automatically() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;
    app.state.credit_repo.grant_referral(LEARNER, 1000).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout/quote", json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["subtotal_pence"].as_i64().unwrap(), 3000);
    assert_eq!(body["promo_discount_pence"].as_i64().unwrap(), 0);
    assert_eq!(body["referral_applied_pence"].as_i64().unwrap(), 1000);
    assert_eq!(body["payable_pence"].as_i64().unwrap(), 2000);
}

#[tokio::test]
async fn test_quote_with_first_lesson_promo() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;

    let res = post_json(&app, "/api/v1/checkout/quote", json!({"promo_code": "FIRSTFREE"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["promo_discount_pence"].as_i64().unwrap(), 3000);
    assert_eq!(body["payable_pence"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn test_promo_rejected_after_a_completed_lesson() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 1, 60).await;
    seed_completed_lesson(&app, &tutor_id, &subject_id).await;

    let res = post_json(&app, "/api/v1/checkout/quote", json!({"promo_code": "FIRSTFREE"})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The failed promo leaves the quote untouched.
    let res = post_json(&app, "/api/v1/checkout/quote", json!({})).await;
    let body = parse_body(res).await;
    assert_eq!(body["promo_discount_pence"].as_i64().unwrap(), 0);
    assert_eq!(body["payable_pence"].as_i64().unwrap(), 1500);
}

#[tokio::test]
async fn test_unknown_promo_code_is_400() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 1, 60).await;

    let res = post_json(&app, "/api/v1/checkout/quote", json!({"promo_code": "HALFOFF"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_empty_cart_is_rejected() {
    let app = TestApp::new().await;
    seed_catalog(&app, 1500).await;

    let res = post_json(&app, "/api/v1/checkout", json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_card_checkout_redirects_and_keeps_cart() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;

    let res = post_json(&app, "/api/v1/checkout", json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["outcome"].as_str().unwrap(), "redirect");
    assert_eq!(body["checkout_url"].as_str().unwrap(), "https://pay.example/session/mock");
    assert_eq!(body["total_amount_pence"].as_i64().unwrap(), 3000);

    // Cart is cleared by the payment webhook, not by session initiation.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/cart")
            .header("X-User-Id", LEARNER)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_gateway_conflict_surfaces_as_409() {
    let app = TestApp::with_gateway(GatewayMode::Conflict).await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 1, 60).await;

    let res = post_json(&app, "/api/v1/checkout", json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_zero_charge_checkout_books_directly() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 1, 60).await;
    app.state.credit_repo.grant_referral(LEARNER, 2000).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout", json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["outcome"].as_str().unwrap(), "zero_charge");
    let lessons = body["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0]["price_pence"].as_i64().unwrap(), 0);
    assert_eq!(lessons[0]["status"].as_str().unwrap(), "CONFIRMED");
    assert!(lessons[0]["room_url"].as_str().unwrap().starts_with("https://rooms.example/"));

    // Only the applied amount was debited.
    assert_eq!(app.state.credit_repo.referral_balance(LEARNER).await.unwrap(), 500);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/cart")
            .header("X-User-Id", LEARNER)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert!(parse_body(res).await["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_promo_checkout_is_fully_free() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;

    let res = post_json(&app, "/api/v1/checkout", json!({"promo_code": "TUTORIAL100"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["outcome"].as_str().unwrap(), "zero_charge");
    let lessons = body["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 2);
    assert!(lessons.iter().all(|l| l["price_pence"].as_i64().unwrap() == 0));
}

#[tokio::test]
async fn test_credits_are_default_when_sufficient() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;
    app.state.credit_repo.grant_lesson_credits(LEARNER, 3).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout", json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["outcome"].as_str().unwrap(), "credits");
    assert_eq!(body["credits_spent"].as_i64().unwrap(), 2);
    assert_eq!(body["lessons"].as_array().unwrap().len(), 2);

    // 1 credit per lesson regardless of duration or price.
    assert_eq!(app.state.credit_repo.lesson_credits(LEARNER).await.unwrap(), 1);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/cart")
            .header("X-User-Id", LEARNER)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert!(parse_body(res).await["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_explicit_credits_with_insufficient_balance() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 3, 60).await;
    app.state.credit_repo.grant_lesson_credits(LEARNER, 2).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout", json!({"payment_method": "credits"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_explicit_card_overrides_credit_default() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 1, 60).await;
    app.state.credit_repo.grant_lesson_credits(LEARNER, 5).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout", json!({"payment_method": "card"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["outcome"].as_str().unwrap(), "redirect");
    assert_eq!(app.state.credit_repo.lesson_credits(LEARNER).await.unwrap(), 5);
}

#[tokio::test]
async fn test_credit_checkout_logs_transaction() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;
    app.state.credit_repo.grant_lesson_credits(LEARNER, 2).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout", json!({"payment_method": "credits"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let logged: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM credit_transactions WHERE user_id = ?")
        .bind(LEARNER)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(logged, 1);
}

#[tokio::test]
async fn test_booked_lessons_are_listed_per_learner() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;
    app.state.credit_repo.grant_lesson_credits(LEARNER, 2).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout", json!({"payment_method": "credits"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/lessons")
            .header("X-User-Id", LEARNER)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let lessons = parse_body(res).await;
    assert_eq!(lessons.as_array().unwrap().len(), 2);
    let lesson_id = lessons[0]["id"].as_str().unwrap().to_string();

    // Lesson detail is owner-scoped.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/lessons/{}", lesson_id))
            .header("X-User-Id", LEARNER)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/lessons/{}", lesson_id))
            .header("X-User-Id", "learner-2")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_discount_distributes_proportionally() {
    let app = TestApp::new().await;
    let (tutor_id, subject_id) = seed_catalog(&app, 1500).await;
    fill_cart(&app, &tutor_id, &subject_id, 2, 60).await;
    app.state.credit_repo.grant_referral(LEARNER, 1500).await.unwrap();

    let res = post_json(&app, "/api/v1/checkout", json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["outcome"].as_str().unwrap(), "redirect");
    // 3000 subtotal, 1500 referral applied: the mock echoes the summed
    // per-item charges back as total_amount.
    assert_eq!(body["total_amount_pence"].as_i64().unwrap(), 1500);
}

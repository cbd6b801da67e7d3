use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::user::UserId;
use crate::api::dtos::{
    requests::{CheckoutQuoteRequest, CheckoutRequest},
    responses::CheckoutResponse,
};
use crate::domain::models::cart::{CartItemDetail, CartSummary};
use crate::domain::models::checkout::{BookingLine, CheckoutSessionRequest, PaymentMethod};
use crate::domain::models::credit::{
    checkout_context_hash, CreditTransaction, KIND_LESSON_CREDIT_SPEND, KIND_REFERRAL_SPEND,
};
use crate::domain::models::lesson::{Lesson, NewLessonParams};
use crate::domain::services::{pricing, reconciler};
use crate::domain::services::reconciler::CheckoutQuote;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

async fn evaluate_cart(
    state: &AppState,
    learner_id: &str,
    promo_code: Option<&str>,
) -> Result<(CartSummary, CheckoutQuote), AppError> {
    let items = state.cart_repo.list_active(learner_id, Utc::now()).await?;
    let summary = pricing::summarize(items);

    let promo_discount = match promo_code {
        Some(code) => {
            let completed = state.lesson_repo.count_completed(learner_id).await?;
            reconciler::validate_promo(code, completed, summary.final_price_pence)?
        }
        None => 0,
    };

    let referral_balance = state.credit_repo.referral_balance(learner_id).await?;
    let credit_balance = state.credit_repo.lesson_credits(learner_id).await?;

    let quote = reconciler::build_quote(&summary, promo_discount, referral_balance, credit_balance);
    Ok((summary, quote))
}

pub async fn quote(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Json(payload): Json<CheckoutQuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (_, quote) = evaluate_cart(&state, &user_id, payload.promo_code.as_deref()).await?;
    Ok(Json(quote))
}

pub async fn checkout(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (summary, quote) = evaluate_cart(&state, &user_id, payload.promo_code.as_deref()).await?;

    if summary.items.is_empty() {
        return Err(AppError::Validation("Cart is empty".into()));
    }

    // Credits are the default settlement when the balance covers the cart.
    let method = payload.payment_method.unwrap_or(if quote.credits_eligible {
        PaymentMethod::Credits
    } else {
        PaymentMethod::Card
    });

    match method {
        PaymentMethod::Credits => {
            if !quote.credits_eligible {
                return Err(AppError::Validation("Insufficient lesson credits".into()));
            }

            let lessons = create_lessons(&state, &user_id, &summary.items, None).await?;
            state.credit_repo.debit_lesson_credits(&user_id, quote.item_count).await?;
            log_spend(&state, &user_id, KIND_LESSON_CREDIT_SPEND, 0, quote.item_count, &summary.items).await;
            state.cart_repo.clear(&user_id).await?;

            info!("Checkout completed with credits for {} ({} lessons)", user_id, lessons.len());
            Ok(Json(CheckoutResponse::Credits {
                credits_spent: quote.item_count,
                lessons,
            }))
        }
        PaymentMethod::Card if quote.payable_pence == 0 => {
            // Fully discounted: lessons are created directly, no payment step.
            let charges = vec![0; summary.items.len()];
            let lessons = create_lessons(&state, &user_id, &summary.items, Some(&charges)).await?;

            if quote.referral_applied_pence > 0 {
                state.credit_repo.debit_referral(&user_id, quote.referral_applied_pence).await?;
                log_spend(&state, &user_id, KIND_REFERRAL_SPEND, quote.referral_applied_pence, quote.item_count, &summary.items).await;
            }
            state.cart_repo.clear(&user_id).await?;

            info!("Zero-charge checkout completed for {} ({} lessons)", user_id, lessons.len());
            Ok(Json(CheckoutResponse::ZeroCharge { lessons }))
        }
        PaymentMethod::Card => {
            let prices: Vec<i64> = summary.items.iter().map(|i| i.price_pence).collect();
            let charges = pricing::distribute_discount(&prices, quote.final_price_pence, quote.total_discount_pence);

            let bookings: Vec<BookingLine> = summary.items.iter().zip(charges.iter()).map(|(item, charge)| {
                BookingLine {
                    tutor_id: item.tutor_id.clone(),
                    subject_id: item.subject_id.clone(),
                    date: item.start_time.format("%Y-%m-%d").to_string(),
                    time: item.start_time.format("%H:%M").to_string(),
                    subject: item.subject_name.clone(),
                    duration: item.duration_min,
                    price: *charge,
                }
            }).collect();

            let request = CheckoutSessionRequest {
                learner_id: user_id.clone(),
                bookings,
                metadata: serde_json::json!({
                    "promo_code": payload.promo_code,
                    "referral_applied_pence": quote.referral_applied_pence,
                }),
            };

            let session = state.checkout_gateway.initiate_checkout(&request).await?;

            // The cart stays intact here; the payment webhook clears it once
            // the session settles.
            info!("Checkout session initiated for {}: {}", user_id, session.session_id);
            Ok(Json(CheckoutResponse::Redirect {
                checkout_url: session.checkout_url,
                session_id: session.session_id,
                total_amount_pence: session.total_amount,
            }))
        }
    }
}

/// Creates confirmed lessons for the direct (non-redirect) checkout paths.
/// A room failure is tolerated: the lesson stands without a room URL.
async fn create_lessons(
    state: &AppState,
    learner_id: &str,
    items: &[CartItemDetail],
    charges: Option<&[i64]>,
) -> Result<Vec<Lesson>, AppError> {
    let mut lessons = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let price_pence = charges.map(|c| c[idx]).unwrap_or(item.price_pence);

        let lesson = Lesson::new(NewLessonParams {
            tutor_id: item.tutor_id.clone(),
            learner_id: learner_id.to_string(),
            subject_id: item.subject_id.clone(),
            start_time: item.start_time,
            duration_min: item.duration_min,
            price_pence,
        });

        let mut created = state.lesson_repo.create(&lesson).await?;

        match state.room_service.create_room(&created.id).await {
            Ok(url) => {
                if let Err(e) = state.lesson_repo.set_room_url(&created.id, &url).await {
                    warn!("Failed to persist room url for lesson {}: {:?}", created.id, e);
                } else {
                    created.room_url = Some(url);
                }
            }
            Err(e) => warn!("Room creation failed for lesson {}: {:?}", created.id, e),
        }

        lessons.push(created);
    }

    Ok(lessons)
}

/// Best-effort transaction bookkeeping. A failure here never rolls back the
/// debit or the created lessons.
async fn log_spend(
    state: &AppState,
    user_id: &str,
    kind: &str,
    amount_pence: i64,
    lesson_count: i64,
    items: &[CartItemDetail],
) {
    let item_ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
    let hash = checkout_context_hash(user_id, kind, &item_ids);

    match state.credit_repo.has_transaction(user_id, &hash).await {
        Ok(true) => info!("Credit transaction already logged for {} (idempotency)", user_id),
        Ok(false) => {
            let tx = CreditTransaction::new(user_id.to_string(), kind, amount_pence, lesson_count, hash);
            if let Err(e) = state.credit_repo.log_transaction(&tx).await {
                warn!("Credit transaction logging failed (continuing): {:?}", e);
            }
        }
        Err(e) => warn!("Credit transaction lookup failed (continuing): {:?}", e),
    }
}

use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::user::UserId;
use crate::api::dtos::{requests::AddCartItemRequest, responses::CartResponse};
use crate::domain::models::cart::{CartItem, NewCartItemParams};
use crate::domain::services::{pricing, slots::SLOT_DURATIONS_MIN};
use crate::error::AppError;
use std::sync::Arc;
use std::collections::{HashMap, HashSet};
use chrono::Utc;
use tracing::info;

async fn build_cart_response(
    state: &AppState,
    learner_id: &str,
    dismissed: &HashSet<String>,
) -> Result<CartResponse, AppError> {
    let now = Utc::now();
    let items = state.cart_repo.list_active(learner_id, now).await?;
    let expiring = pricing::expiry_notifications(&items, now, state.config.expiry_notice_minutes, dismissed);
    let summary = pricing::summarize(items);

    Ok(CartResponse {
        items: summary.items,
        subtotal_pence: summary.subtotal_pence,
        discount_pence: summary.discount_pence,
        final_price_pence: summary.final_price_pence,
        expiring,
    })
}

pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let dismissed: HashSet<String> = params.get("dismissed")
        .map(|s| s.split(',').filter(|v| !v.is_empty()).map(String::from).collect())
        .unwrap_or_default();

    let response = build_cart_response(&state, &user_id, &dismissed).await?;
    Ok(Json(response))
}

pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !SLOT_DURATIONS_MIN.contains(&payload.duration_min) {
        return Err(AppError::Validation("duration_min must be 30 or 60".into()));
    }
    if payload.start_time <= Utc::now() {
        return Err(AppError::Validation("Cannot reserve a time slot in the past".into()));
    }

    let tutor = state.catalog_repo.find_tutor(&payload.tutor_id).await?
        .ok_or(AppError::NotFound("Tutor not found".into()))?;
    state.catalog_repo.find_subject(&payload.subject_id).await?
        .ok_or(AppError::NotFound("Subject not found".into()))?;

    let item = CartItem::new(
        NewCartItemParams {
            learner_id: user_id.clone(),
            tutor_id: payload.tutor_id,
            subject_id: payload.subject_id,
            start_time: payload.start_time,
            duration_min: payload.duration_min,
            price_pence: tutor.slot_price_pence(payload.duration_min),
        },
        state.config.cart_ttl_minutes,
    );

    let created = state.cart_repo.insert(&item).await?;
    info!("Cart item added: {} for learner {}", created.id, user_id);

    let response = build_cart_response(&state, &user_id, &HashSet::new()).await?;
    Ok(Json(response))
}

pub async fn remove_cart_item(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.cart_repo.delete(&user_id, &item_id).await?;
    info!("Cart item removed: {}", item_id);

    let response = build_cart_response(&state, &user_id, &HashSet::new()).await?;
    Ok(Json(response))
}

pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<impl IntoResponse, AppError> {
    state.cart_repo.clear(&user_id).await?;
    info!("Cart cleared for learner {}", user_id);
    Ok(Json(serde_json::json!({"status": "cleared"})))
}

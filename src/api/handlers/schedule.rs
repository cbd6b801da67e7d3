use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::user::UserId;
use crate::api::dtos::{
    requests::{AddOneOffRequest, AddRecurringRequest},
    responses::ScheduleResponse,
};
use crate::domain::models::availability::{OneOffAvailability, RecurringAvailability};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{Duration, NaiveTime, Utc};
use tracing::info;

fn parse_window(start: &str, end: &str) -> Result<(NaiveTime, NaiveTime), AppError> {
    let start = NaiveTime::parse_from_str(start, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid start time (HH:MM)".into()))?;
    let end = NaiveTime::parse_from_str(end, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid end time (HH:MM)".into()))?;
    if end <= start {
        return Err(AppError::Validation("End time must be after start time".into()));
    }
    Ok((start, end))
}

async fn require_tutor_self(state: &AppState, user_id: &str, tutor_id: &str) -> Result<(), AppError> {
    if user_id != tutor_id {
        return Err(AppError::Forbidden("Only the tutor can edit their schedule".into()));
    }
    state.catalog_repo.find_tutor(tutor_id).await?
        .ok_or(AppError::NotFound("Tutor not found".into()))?;
    Ok(())
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(tutor_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.catalog_repo.find_tutor(&tutor_id).await?
        .ok_or(AppError::NotFound("Tutor not found".into()))?;

    let today = Utc::now().date_naive();
    let recurring = state.availability_repo.list_recurring(&tutor_id).await?;
    let one_off = state.availability_repo.list_one_off(&tutor_id, today, today + Duration::days(365)).await?;

    Ok(Json(ScheduleResponse { recurring, one_off }))
}

pub async fn add_recurring(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Path(tutor_id): Path<String>,
    Json(payload): Json<AddRecurringRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_tutor_self(&state, &user_id, &tutor_id).await?;

    if !(0..=6).contains(&payload.day_of_week) {
        return Err(AppError::Validation("day_of_week must be 0..6 (0 = Monday)".into()));
    }
    parse_window(&payload.start, &payload.end)?;

    let rule = RecurringAvailability::new(
        tutor_id,
        payload.day_of_week,
        payload.start,
        payload.end,
        &payload.subjects.unwrap_or_default(),
    );
    let created = state.availability_repo.add_recurring(&rule).await?;
    info!("Recurring availability added: {} (day {})", created.id, created.day_of_week);
    Ok(Json(created))
}

pub async fn delete_recurring(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Path((tutor_id, rule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    require_tutor_self(&state, &user_id, &tutor_id).await?;
    state.availability_repo.delete_recurring(&tutor_id, &rule_id).await?;
    info!("Recurring availability removed: {}", rule_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn add_one_off(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Path(tutor_id): Path<String>,
    Json(payload): Json<AddOneOffRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_tutor_self(&state, &user_id, &tutor_id).await?;
    parse_window(&payload.start, &payload.end)?;

    let window = OneOffAvailability::new(tutor_id, payload.date, payload.start, payload.end);
    let created = state.availability_repo.add_one_off(&window).await?;
    info!("One-off availability added: {} on {}", created.id, created.date);
    Ok(Json(created))
}

pub async fn delete_one_off(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Path((tutor_id, window_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    require_tutor_self(&state, &user_id, &tutor_id).await?;
    state.availability_repo.delete_one_off(&tutor_id, &window_id).await?;
    info!("One-off availability removed: {}", window_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

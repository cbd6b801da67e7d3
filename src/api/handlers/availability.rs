use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::SlotsResponse;
use crate::domain::services::slots::{resolve_week_slots, SLOT_DURATIONS_MIN};
use crate::error::AppError;
use std::sync::Arc;
use std::collections::HashMap;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use tracing::warn;

pub async fn get_week_slots(
    State(state): State<Arc<AppState>>,
    Path(tutor_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = state.catalog_repo.find_tutor(&tutor_id).await?
        .ok_or(AppError::NotFound("Tutor not found".into()))?;

    let week_start_str = params.get("week_start")
        .ok_or(AppError::Validation("week_start required".into()))?;
    let week_start = NaiveDate::parse_from_str(week_start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid week_start format".into()))?;
    if week_start.weekday() != Weekday::Mon {
        return Err(AppError::Validation("week_start must be a Monday".into()));
    }

    let duration_min: i64 = params.get("duration")
        .ok_or(AppError::Validation("duration required".into()))?
        .parse()
        .map_err(|_| AppError::Validation("Invalid duration".into()))?;
    if !SLOT_DURATIONS_MIN.contains(&duration_min) {
        return Err(AppError::Validation("duration must be 30 or 60".into()));
    }

    let subject = params.get("subject").map(|s| s.as_str());

    // Each source fails independently: a fetch error contributes nothing but
    // never aborts the other sources.
    let recurring = match state.availability_repo.list_recurring(&tutor_id).await {
        Ok(rules) => rules,
        Err(e) => {
            warn!("Failed to load recurring availability for {}: {:?}", tutor_id, e);
            Vec::new()
        }
    };

    let week_end = week_start + Duration::days(6);
    let one_off = match state.availability_repo.list_one_off(&tutor_id, week_start, week_end).await {
        Ok(windows) => windows,
        Err(e) => {
            warn!("Failed to load one-off availability for {}: {:?}", tutor_id, e);
            Vec::new()
        }
    };

    // Fetch lessons over the window padded by a day on each side so every
    // tutor-local offset of the week is covered in UTC.
    let range_start = week_start.and_hms_opt(0, 0, 0).unwrap().and_utc() - Duration::days(1);
    let range_end = range_start + Duration::days(9);
    let lessons = match state.lesson_repo.list_by_tutor_range(&tutor_id, range_start, range_end).await {
        Ok(lessons) => lessons,
        Err(e) => {
            warn!("Failed to load lessons for {}: {:?}", tutor_id, e);
            Vec::new()
        }
    };

    let slots = resolve_week_slots(
        &tutor,
        week_start,
        duration_min,
        subject,
        &recurring,
        &one_off,
        &lessons,
        Utc::now(),
    );

    Ok(Json(SlotsResponse {
        week_start: week_start.to_string(),
        duration_min,
        slots,
    }))
}

use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateSubjectRequest, CreateTutorRequest};
use crate::domain::models::{subject::Subject, tutor::Tutor};
use crate::error::AppError;
use std::sync::Arc;
use chrono_tz::Tz;
use tracing::info;

pub async fn create_tutor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTutorRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.timezone.parse::<Tz>().is_err() {
        return Err(AppError::Validation("Invalid timezone".into()));
    }
    if payload.hourly_rate_pence <= 0 {
        return Err(AppError::Validation("Hourly rate must be positive".into()));
    }

    let tutor = Tutor::new(payload.display_name, payload.timezone, payload.hourly_rate_pence);
    let created = state.catalog_repo.create_tutor(&tutor).await?;
    info!("Tutor created: {}", created.id);
    Ok(Json(created))
}

pub async fn get_tutor(
    State(state): State<Arc<AppState>>,
    Path(tutor_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tutor = state.catalog_repo.find_tutor(&tutor_id).await?
        .ok_or(AppError::NotFound("Tutor not found".into()))?;
    Ok(Json(tutor))
}

pub async fn create_subject(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Subject name required".into()));
    }

    let subject = Subject::new(payload.name);
    let created = state.catalog_repo.create_subject(&subject).await?;
    info!("Subject created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_subjects(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let subjects = state.catalog_repo.list_subjects().await?;
    Ok(Json(subjects))
}

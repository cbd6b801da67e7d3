use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::user::UserId;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_my_lessons(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
) -> Result<impl IntoResponse, AppError> {
    let lessons = state.lesson_repo.list_by_learner(&user_id).await?;
    Ok(Json(lessons))
}

pub async fn get_lesson(
    State(state): State<Arc<AppState>>,
    UserId(user_id): UserId,
    Path(lesson_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let lesson = state.lesson_repo.find_by_id(&lesson_id).await?
        .filter(|l| l.learner_id == user_id)
        .ok_or(AppError::NotFound("Lesson not found".into()))?;
    Ok(Json(lesson))
}

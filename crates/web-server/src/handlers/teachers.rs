use super::{parse_id, PageParams, ValidJson};
use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_types::{EntityKind, Pages, TeacherRequest, TeacherResponse};
use std::sync::Arc;

/// # POST /api/v1/teachers
pub async fn create_teacher(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<TeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), AppError> {
    tracing::info!("create_teacher called");
    let teacher = state
        .teachers
        .create_teacher(request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to save teacher"))?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// # PATCH /api/v1/teachers/:id
pub async fn update_teacher(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<TeacherRequest>,
) -> Result<Json<TeacherResponse>, AppError> {
    tracing::info!("update_teacher called");
    let id = parse_id(&id, EntityKind::Teacher)?;
    let teacher = state
        .teachers
        .update_teacher(id, request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to update teacher"))?;
    Ok(Json(teacher))
}

/// # GET /api/v1/teachers/:id
/// Includes the courses the teacher teaches and the departments it heads.
pub async fn get_teacher(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeacherResponse>, AppError> {
    tracing::info!("get_teacher called");
    let id = parse_id(&id, EntityKind::Teacher)?;
    let teacher = state
        .teachers
        .find_teacher_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "something went wrong"))?;
    Ok(Json(teacher))
}

/// # GET /api/v1/teachers
pub async fn get_teachers(
    State(state): State<Arc<AppState>>,
    PageParams(query): PageParams,
) -> Result<Json<Pages<TeacherResponse>>, AppError> {
    tracing::info!("get_teachers called");
    let total = state
        .teachers
        .count()
        .await
        .map_err(|e| AppError::from_service(e, "failed to count teachers"))?;
    let pages = Pages::<()>::from_query(&query, total);
    let teachers = state
        .teachers
        .find_all_teachers(pages.page, pages.per_page)
        .await
        .map_err(|e| AppError::from_service(e, "failed to get all teachers"))?;
    Ok(Json(pages.with_items(teachers)))
}

/// # DELETE /api/v1/teachers/:id
pub async fn delete_teacher(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::info!("delete_teacher called");
    let id = parse_id(&id, EntityKind::Teacher)?;
    state
        .teachers
        .delete_teacher_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "failed to delete teacher"))?;
    Ok(StatusCode::NO_CONTENT)
}

use super::{parse_id, PageParams, ValidJson};
use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_types::{CourseRequest, CourseResponse, EntityKind, Pages};
use std::sync::Arc;

/// # POST /api/v1/courses
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    tracing::info!("create_course called");
    let course = state
        .courses
        .create_course(request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to save course"))?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// # PATCH /api/v1/courses/:id
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<CourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    tracing::info!("update_course called");
    let id = parse_id(&id, EntityKind::Course)?;
    let course = state
        .courses
        .update_course(id, request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to update course"))?;
    Ok(Json(course))
}

/// # GET /api/v1/courses/:id
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, AppError> {
    tracing::info!("get_course called");
    let id = parse_id(&id, EntityKind::Course)?;
    let course = state
        .courses
        .find_course_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "something went wrong"))?;
    Ok(Json(course))
}

/// # GET /api/v1/courses
pub async fn get_courses(
    State(state): State<Arc<AppState>>,
    PageParams(query): PageParams,
) -> Result<Json<Pages<CourseResponse>>, AppError> {
    tracing::info!("get_courses called");
    let total = state
        .courses
        .count()
        .await
        .map_err(|e| AppError::from_service(e, "failed to count courses"))?;
    let pages = Pages::<()>::from_query(&query, total);
    let courses = state
        .courses
        .find_all_courses(pages.page, pages.per_page)
        .await
        .map_err(|e| AppError::from_service(e, "failed to get courses"))?;
    Ok(Json(pages.with_items(courses)))
}

/// # DELETE /api/v1/courses/:id
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::info!("delete_course called");
    let id = parse_id(&id, EntityKind::Course)?;
    state
        .courses
        .delete_course_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "failed to delete course"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// # POST /api/v1/courses/:id/teacher/:teacher_id
pub async fn set_teacher_to_course(
    State(state): State<Arc<AppState>>,
    Path((course_id, teacher_id)): Path<(String, String)>,
) -> Result<Json<CourseResponse>, AppError> {
    tracing::info!("set_teacher_to_course called");
    let course_id = parse_id(&course_id, EntityKind::Course)?;
    let teacher_id = parse_id(&teacher_id, EntityKind::Teacher)?;
    let course = state
        .courses
        .set_teacher_to_course(course_id, teacher_id)
        .await
        .map_err(|e| AppError::from_service(e, "internal server error"))?;
    Ok(Json(course))
}

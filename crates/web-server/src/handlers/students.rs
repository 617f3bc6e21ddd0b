use super::{parse_id, PageParams, ValidJson};
use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_types::{CourseSummary, EntityKind, Pages, StudentRequest, StudentResponse};
use std::sync::Arc;

/// # POST /api/v1/students
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<StudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    tracing::info!("create_student called");
    let student = state
        .students
        .create_student(request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to save student"))?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// # PATCH /api/v1/students/:id
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<StudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    tracing::info!("update_student called");
    let id = parse_id(&id, EntityKind::Student)?;
    let student = state
        .students
        .update_student(id, request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to update student"))?;
    Ok(Json(student))
}

/// # GET /api/v1/students/:id
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>, AppError> {
    tracing::info!("get_student called");
    let id = parse_id(&id, EntityKind::Student)?;
    let student = state
        .students
        .find_student_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "something went wrong"))?;
    Ok(Json(student))
}

/// # GET /api/v1/students
pub async fn get_students(
    State(state): State<Arc<AppState>>,
    PageParams(query): PageParams,
) -> Result<Json<Pages<StudentResponse>>, AppError> {
    tracing::info!("get_students called");
    let total = state
        .students
        .count()
        .await
        .map_err(|e| AppError::from_service(e, "failed to count students"))?;
    let pages = Pages::<()>::from_query(&query, total);
    let students = state
        .students
        .find_all_students(pages.page, pages.per_page)
        .await
        .map_err(|e| AppError::from_service(e, "failed to get students"))?;
    Ok(Json(pages.with_items(students)))
}

/// # GET /api/v1/students/:id/courses
pub async fn get_student_courses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CourseSummary>>, AppError> {
    tracing::info!("get_student_courses called");
    let id = parse_id(&id, EntityKind::Student)?;
    let courses = state
        .students
        .find_student_courses(id)
        .await
        .map_err(|e| AppError::from_service(e, "failed to get student courses"))?;
    Ok(Json(courses))
}

/// # DELETE /api/v1/students/:id
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::info!("delete_student called");
    let id = parse_id(&id, EntityKind::Student)?;
    state
        .students
        .delete_student_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "failed to delete student"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// # POST /api/v1/students/:id/courses/:course_id
/// Enrolls the student in the course.
pub async fn add_course_to_student(
    State(state): State<Arc<AppState>>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<Json<StudentResponse>, AppError> {
    tracing::info!("add_course_to_student called");
    let student_id = parse_id(&student_id, EntityKind::Student)?;
    let course_id = parse_id(&course_id, EntityKind::Course)?;
    let student = state
        .students
        .add_course_to_student(student_id, course_id)
        .await
        .map_err(|e| AppError::from_service(e, "internal server error"))?;
    Ok(Json(student))
}

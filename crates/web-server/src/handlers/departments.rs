use super::{parse_id, PageParams, ValidJson};
use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_types::{DepartmentRequest, DepartmentResponse, EntityKind, Pages};
use std::sync::Arc;

/// # POST /api/v1/departments
pub async fn create_department(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<DepartmentRequest>,
) -> Result<(StatusCode, Json<DepartmentResponse>), AppError> {
    tracing::info!("create_department called");
    let department = state
        .departments
        .create_department(request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to save department"))?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// # PATCH /api/v1/departments/:id
pub async fn update_department(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(request): ValidJson<DepartmentRequest>,
) -> Result<Json<DepartmentResponse>, AppError> {
    tracing::info!("update_department called");
    let id = parse_id(&id, EntityKind::Department)?;
    let department = state
        .departments
        .update_department(id, request)
        .await
        .map_err(|e| AppError::from_service(e, "failed to update department"))?;
    Ok(Json(department))
}

/// # GET /api/v1/departments/:id
pub async fn get_department(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DepartmentResponse>, AppError> {
    tracing::info!("get_department called");
    let id = parse_id(&id, EntityKind::Department)?;
    let department = state
        .departments
        .find_department_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "something went wrong"))?;
    Ok(Json(department))
}

/// # GET /api/v1/departments
pub async fn get_departments(
    State(state): State<Arc<AppState>>,
    PageParams(query): PageParams,
) -> Result<Json<Pages<DepartmentResponse>>, AppError> {
    tracing::info!("get_departments called");
    let total = state
        .departments
        .count()
        .await
        .map_err(|e| AppError::from_service(e, "failed to count departments"))?;
    let pages = Pages::<()>::from_query(&query, total);
    let departments = state
        .departments
        .find_all_departments(pages.page, pages.per_page)
        .await
        .map_err(|e| AppError::from_service(e, "failed to get departments"))?;
    Ok(Json(pages.with_items(departments)))
}

/// # DELETE /api/v1/departments/:id
pub async fn delete_department(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::info!("delete_department called");
    let id = parse_id(&id, EntityKind::Department)?;
    state
        .departments
        .delete_department_by_id(id)
        .await
        .map_err(|e| AppError::from_service(e, "failed to delete department"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// # POST /api/v1/departments/:id/teacher/:teacher_id
/// Makes the teacher head of the department.
pub async fn department_set_teacher(
    State(state): State<Arc<AppState>>,
    Path((department_id, teacher_id)): Path<(String, String)>,
) -> Result<Json<DepartmentResponse>, AppError> {
    tracing::info!("department_set_teacher called");
    let department_id = parse_id(&department_id, EntityKind::Department)?;
    let teacher_id = parse_id(&teacher_id, EntityKind::Teacher)?;
    let department = state
        .departments
        .department_set_teacher(department_id, teacher_id)
        .await
        .map_err(|e| AppError::from_service(e, "internal server error"))?;
    Ok(Json(department))
}

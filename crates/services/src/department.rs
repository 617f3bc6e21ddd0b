use crate::{ensure_exists, ServiceError};
use core_types::{Department, DepartmentRequest, DepartmentResponse, EntityKind, Id};
use database::{DepartmentRepository, TeacherRepository};
use std::sync::Arc;

const KIND: EntityKind = EntityKind::Department;

pub struct DepartmentService {
    departments: Arc<dyn DepartmentRepository>,
    teachers: Arc<dyn TeacherRepository>,
}

impl DepartmentService {
    pub fn new(departments: Arc<dyn DepartmentRepository>, teachers: Arc<dyn TeacherRepository>) -> Self {
        Self { departments, teachers }
    }

    pub async fn create_department(&self, request: DepartmentRequest) -> Result<DepartmentResponse, ServiceError> {
        tracing::info!(name = %request.name, "Creating department.");
        let department = self
            .departments
            .save(Department::new(request.name))
            .await
            .map_err(ServiceError::Database)?;
        Ok(department.into())
    }

    pub async fn update_department(&self, id: Id, request: DepartmentRequest) -> Result<DepartmentResponse, ServiceError> {
        tracing::info!(id, "Updating department.");
        let department = Department {
            id,
            ..Department::new(request.name)
        };
        let department = self
            .departments
            .update(department)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(department.into())
    }

    pub async fn find_department_by_id(&self, id: Id) -> Result<DepartmentResponse, ServiceError> {
        tracing::info!(id, "Fetching department.");
        let department = self
            .departments
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(department.into())
    }

    pub async fn find_all_departments(&self, page: i64, limit: i64) -> Result<Vec<DepartmentResponse>, ServiceError> {
        tracing::info!(page, limit, "Listing departments.");
        let departments = self
            .departments
            .find_all(page, limit)
            .await
            .map_err(ServiceError::Database)?;
        Ok(departments.into_iter().map(DepartmentResponse::from).collect())
    }

    pub async fn delete_department_by_id(&self, id: Id) -> Result<(), ServiceError> {
        tracing::info!(id, "Deleting department.");
        self.departments.delete_by_id(id).await.map_err(ServiceError::Database)
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        self.departments.count().await.map_err(ServiceError::Database)
    }

    /// Makes a teacher the head of a department.
    pub async fn department_set_teacher(&self, department_id: Id, teacher_id: Id) -> Result<DepartmentResponse, ServiceError> {
        tracing::info!(department_id, teacher_id, "Assigning head of department.");
        ensure_exists(self.departments.exists_by_id(department_id), KIND, department_id).await?;
        ensure_exists(self.teachers.exists_by_id(teacher_id), EntityKind::Teacher, teacher_id).await?;

        self.departments
            .set_head(department_id, teacher_id)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;

        self.find_department_by_id(department_id).await
    }
}

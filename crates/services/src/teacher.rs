use crate::ServiceError;
use core_types::{EntityKind, Id, Teacher, TeacherRequest, TeacherResponse};
use database::TeacherRepository;
use std::sync::Arc;

const KIND: EntityKind = EntityKind::Teacher;

pub struct TeacherService {
    teachers: Arc<dyn TeacherRepository>,
}

impl TeacherService {
    pub fn new(teachers: Arc<dyn TeacherRepository>) -> Self {
        Self { teachers }
    }

    pub async fn create_teacher(&self, request: TeacherRequest) -> Result<TeacherResponse, ServiceError> {
        tracing::info!(name = %request.name, "Creating teacher.");
        let teacher = self
            .teachers
            .save(Teacher::new(request.name))
            .await
            .map_err(ServiceError::Database)?;
        Ok(teacher.into())
    }

    pub async fn update_teacher(&self, id: Id, request: TeacherRequest) -> Result<TeacherResponse, ServiceError> {
        tracing::info!(id, "Updating teacher.");
        let teacher = Teacher {
            id,
            ..Teacher::new(request.name)
        };
        let teacher = self
            .teachers
            .update(teacher)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(teacher.into())
    }

    pub async fn find_teacher_by_id(&self, id: Id) -> Result<TeacherResponse, ServiceError> {
        tracing::info!(id, "Fetching teacher.");
        let teacher = self
            .teachers
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(teacher.into())
    }

    pub async fn find_all_teachers(&self, page: i64, limit: i64) -> Result<Vec<TeacherResponse>, ServiceError> {
        tracing::info!(page, limit, "Listing teachers.");
        let teachers = self
            .teachers
            .find_all(page, limit)
            .await
            .map_err(ServiceError::Database)?;
        Ok(teachers.into_iter().map(TeacherResponse::from).collect())
    }

    /// Courses and departments that pointed at the teacher are left unassigned.
    pub async fn delete_teacher_by_id(&self, id: Id) -> Result<(), ServiceError> {
        tracing::info!(id, "Deleting teacher.");
        self.teachers.delete_by_id(id).await.map_err(ServiceError::Database)
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        self.teachers.count().await.map_err(ServiceError::Database)
    }
}

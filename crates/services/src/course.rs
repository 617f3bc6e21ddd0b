use crate::{ensure_exists, ServiceError};
use core_types::{Course, CourseRequest, CourseResponse, EntityKind, Id};
use database::{CourseRepository, TeacherRepository};
use std::sync::Arc;

const KIND: EntityKind = EntityKind::Course;

pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    teachers: Arc<dyn TeacherRepository>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepository>, teachers: Arc<dyn TeacherRepository>) -> Self {
        Self { courses, teachers }
    }

    /// New courses never carry a teacher; see [`Self::set_teacher_to_course`].
    pub async fn create_course(&self, request: CourseRequest) -> Result<CourseResponse, ServiceError> {
        tracing::info!(title = %request.title, "Creating course.");
        let course = self
            .courses
            .save(Course::new(request.title))
            .await
            .map_err(ServiceError::Database)?;
        Ok(course.into())
    }

    pub async fn update_course(&self, id: Id, request: CourseRequest) -> Result<CourseResponse, ServiceError> {
        tracing::info!(id, "Updating course.");
        let course = Course {
            id,
            ..Course::new(request.title)
        };
        let course = self
            .courses
            .update(course)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(course.into())
    }

    pub async fn find_course_by_id(&self, id: Id) -> Result<CourseResponse, ServiceError> {
        tracing::info!(id, "Fetching course.");
        let course = self
            .courses
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(course.into())
    }

    pub async fn find_all_courses(&self, page: i64, limit: i64) -> Result<Vec<CourseResponse>, ServiceError> {
        tracing::info!(page, limit, "Listing courses.");
        let courses = self
            .courses
            .find_all(page, limit)
            .await
            .map_err(ServiceError::Database)?;
        Ok(courses.into_iter().map(CourseResponse::from).collect())
    }

    pub async fn delete_course_by_id(&self, id: Id) -> Result<(), ServiceError> {
        tracing::info!(id, "Deleting course.");
        self.courses.delete_by_id(id).await.map_err(ServiceError::Database)
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        self.courses.count().await.map_err(ServiceError::Database)
    }

    pub async fn set_teacher_to_course(&self, course_id: Id, teacher_id: Id) -> Result<CourseResponse, ServiceError> {
        tracing::info!(course_id, teacher_id, "Assigning teacher to course.");
        ensure_exists(self.courses.exists_by_id(course_id), KIND, course_id).await?;
        ensure_exists(self.teachers.exists_by_id(teacher_id), EntityKind::Teacher, teacher_id).await?;

        self.courses
            .set_teacher(course_id, teacher_id)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;

        self.find_course_by_id(course_id).await
    }
}

use crate::{ensure_exists, ServiceError};
use core_types::{CourseSummary, EntityKind, Id, Student, StudentRequest, StudentResponse};
use database::{CourseRepository, StudentRepository};
use std::sync::Arc;

const KIND: EntityKind = EntityKind::Student;

pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { students, courses }
    }

    pub async fn create_student(&self, request: StudentRequest) -> Result<StudentResponse, ServiceError> {
        tracing::info!(name = %request.name, "Creating student.");
        let student = self
            .students
            .save(Student::new(request.name, request.email))
            .await
            .map_err(ServiceError::Database)?;
        Ok(student.into())
    }

    pub async fn update_student(&self, id: Id, request: StudentRequest) -> Result<StudentResponse, ServiceError> {
        tracing::info!(id, "Updating student.");
        let student = Student {
            id,
            ..Student::new(request.name, request.email)
        };
        let student = self
            .students
            .update(student)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(student.into())
    }

    pub async fn find_student_by_id(&self, id: Id) -> Result<StudentResponse, ServiceError> {
        tracing::info!(id, "Fetching student.");
        let student = self
            .students
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;
        Ok(student.into())
    }

    pub async fn find_all_students(&self, page: i64, limit: i64) -> Result<Vec<StudentResponse>, ServiceError> {
        tracing::info!(page, limit, "Listing students.");
        let students = self
            .students
            .find_all(page, limit)
            .await
            .map_err(ServiceError::Database)?;
        Ok(students.into_iter().map(StudentResponse::from).collect())
    }

    /// The courses a student is enrolled in, each with its teacher.
    pub async fn find_student_courses(&self, id: Id) -> Result<Vec<CourseSummary>, ServiceError> {
        Ok(self.find_student_by_id(id).await?.courses)
    }

    pub async fn delete_student_by_id(&self, id: Id) -> Result<(), ServiceError> {
        tracing::info!(id, "Deleting student.");
        self.students.delete_by_id(id).await.map_err(ServiceError::Database)
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        self.students.count().await.map_err(ServiceError::Database)
    }

    /// Enrolls a student in a course and returns the refreshed student.
    /// Enrolling in the same course again leaves a single enrollment.
    pub async fn add_course_to_student(&self, student_id: Id, course_id: Id) -> Result<StudentResponse, ServiceError> {
        tracing::info!(student_id, course_id, "Adding course to student.");
        ensure_exists(self.students.exists_by_id(student_id), KIND, student_id).await?;
        ensure_exists(self.courses.exists_by_id(course_id), EntityKind::Course, course_id).await?;

        self.students
            .add_course(student_id, course_id)
            .await
            .map_err(|e| ServiceError::from_db(e, KIND))?;

        self.find_student_by_id(student_id).await
    }
}

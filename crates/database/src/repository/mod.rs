//! Repository contracts, one per entity.
//!
//! Every repository has the same shape: existence check, insert, update,
//! eager-loading point lookup, paged list, delete and count. Lists are ordered
//! by `id` ascending. `find_by_id` and `update` return `DbError::NotFound` when
//! the row is absent; `exists_by_id` and `delete_by_id` never do.

use crate::error::DbError;
use async_trait::async_trait;
use core_types::{Course, Department, Id, Student, Teacher};
use sqlx::PgPool;
use std::sync::Arc;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{
    PgCourseRepository, PgDepartmentRepository, PgStudentRepository, PgTeacherRepository,
};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError>;
    /// Inserts the student and returns it with its generated ID.
    async fn save(&self, student: Student) -> Result<Student, DbError>;
    /// Replaces name and email, then re-reads the student with its courses.
    async fn update(&self, student: Student) -> Result<Student, DbError>;
    /// Loads the student with its courses and each course's teacher.
    async fn find_by_id(&self, id: Id) -> Result<Student, DbError>;
    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Student>, DbError>;
    async fn delete_by_id(&self, id: Id) -> Result<(), DbError>;
    async fn count(&self) -> Result<i64, DbError>;
    /// Enrolls the student in the course. Enrolling twice is a no-op.
    async fn add_course(&self, student_id: Id, course_id: Id) -> Result<(), DbError>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError>;
    async fn save(&self, teacher: Teacher) -> Result<Teacher, DbError>;
    async fn update(&self, teacher: Teacher) -> Result<Teacher, DbError>;
    /// Loads the teacher with the courses it teaches and the departments it heads.
    async fn find_by_id(&self, id: Id) -> Result<Teacher, DbError>;
    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Teacher>, DbError>;
    async fn delete_by_id(&self, id: Id) -> Result<(), DbError>;
    async fn count(&self) -> Result<i64, DbError>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError>;
    async fn save(&self, course: Course) -> Result<Course, DbError>;
    /// Replaces the title only; the teacher assignment is left untouched.
    async fn update(&self, course: Course) -> Result<Course, DbError>;
    /// Loads the course with its teacher and enrolled students.
    async fn find_by_id(&self, id: Id) -> Result<Course, DbError>;
    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Course>, DbError>;
    async fn delete_by_id(&self, id: Id) -> Result<(), DbError>;
    async fn count(&self) -> Result<i64, DbError>;
    /// Points the course at a teacher. `NotFound` when the course is absent,
    /// `MissingReference(Teacher)` when the teacher is.
    async fn set_teacher(&self, course_id: Id, teacher_id: Id) -> Result<(), DbError>;
}

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError>;
    async fn save(&self, department: Department) -> Result<Department, DbError>;
    /// Replaces the name only; the head of department is left untouched.
    async fn update(&self, department: Department) -> Result<Department, DbError>;
    /// Loads the department with its head teacher.
    async fn find_by_id(&self, id: Id) -> Result<Department, DbError>;
    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Department>, DbError>;
    async fn delete_by_id(&self, id: Id) -> Result<(), DbError>;
    async fn count(&self) -> Result<i64, DbError>;
    /// Same contract as [`CourseRepository::set_teacher`].
    async fn set_head(&self, department_id: Id, teacher_id: Id) -> Result<(), DbError>;
}

/// The four repositories, built over one shared storage handle.
#[derive(Clone)]
pub struct Repositories {
    pub students: Arc<dyn StudentRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub departments: Arc<dyn DepartmentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            students: Arc::new(PgStudentRepository::new(pool.clone())),
            teachers: Arc::new(PgTeacherRepository::new(pool.clone())),
            courses: Arc::new(PgCourseRepository::new(pool.clone())),
            departments: Arc::new(PgDepartmentRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            students: Arc::new(store.clone()),
            teachers: Arc::new(store.clone()),
            courses: Arc::new(store.clone()),
            departments: Arc::new(store),
        }
    }
}

/// Row offset for a 1-based page.
pub(crate) fn offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1) * limit
}

use super::{group_by_owner, CourseRow, Owned, StudentRow};
use crate::error::DbError;
use crate::repository::{offset, CourseRepository};
use async_trait::async_trait;
use core_types::{Course, Id, Student};
use sqlx::PgPool;

const SELECT_COURSE: &str = r#"
    SELECT c.id, c.title, c.teacher_id, t.name AS teacher_name
    FROM courses AS c
    LEFT JOIN teachers AS t ON t.id = c.teacher_id
"#;

#[derive(Debug, Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches the enrolled students of each course. Teachers are already
    /// joined in by `SELECT_COURSE`.
    async fn load_students(&self, mut courses: Vec<Course>) -> Result<Vec<Course>, DbError> {
        if courses.is_empty() {
            return Ok(courses);
        }
        let ids: Vec<Id> = courses.iter().map(|c| c.id).collect();

        let rows = sqlx::query_as::<_, Owned<StudentRow>>(
            r#"
            SELECT cs.course_id AS owner_id, s.id, s.name, s.email
            FROM course_student AS cs
            JOIN students AS s ON s.id = cs.student_id
            WHERE cs.course_id = ANY($1)
            ORDER BY cs.course_id, s.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut students = group_by_owner(rows, Student::from);
        for course in &mut courses {
            course.students = students.remove(&course.id).unwrap_or_default();
        }
        Ok(courses)
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, mut course: Course) -> Result<Course, DbError> {
        course.id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO courses (title, teacher_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&course.title)
        .bind(course.teacher_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(course)
    }

    async fn update(&self, course: Course) -> Result<Course, DbError> {
        sqlx::query("UPDATE courses SET title = $1 WHERE id = $2")
            .bind(&course.title)
            .bind(course.id)
            .execute(&self.pool)
            .await?;
        self.find_by_id(course.id).await
    }

    async fn find_by_id(&self, id: Id) -> Result<Course, DbError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!("{SELECT_COURSE} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)?;

        let mut loaded = self.load_students(vec![row.into()]).await?;
        loaded.pop().ok_or(DbError::NotFound)
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Course>, DbError> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "{SELECT_COURSE} ORDER BY c.id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset(page, limit))
        .fetch_all(&self.pool)
        .await?;

        self.load_students(rows.into_iter().map(Course::from).collect()).await
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn set_teacher(&self, course_id: Id, teacher_id: Id) -> Result<(), DbError> {
        // A missing teacher is rejected by fk_courses_teacher.
        let result = sqlx::query("UPDATE courses SET teacher_id = $1 WHERE id = $2")
            .bind(teacher_id)
            .bind(course_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}

use super::{group_by_owner, CourseRow, Owned, StudentRow};
use crate::error::DbError;
use crate::repository::{offset, StudentRepository};
use async_trait::async_trait;
use core_types::{Course, Id, Student};
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches each student's courses, with every course's teacher joined in.
    async fn load_courses(&self, mut students: Vec<Student>) -> Result<Vec<Student>, DbError> {
        if students.is_empty() {
            return Ok(students);
        }
        let ids: Vec<Id> = students.iter().map(|s| s.id).collect();

        let rows = sqlx::query_as::<_, Owned<CourseRow>>(
            r#"
            SELECT cs.student_id AS owner_id, c.id, c.title, c.teacher_id, t.name AS teacher_name
            FROM course_student AS cs
            JOIN courses AS c ON c.id = cs.course_id
            LEFT JOIN teachers AS t ON t.id = c.teacher_id
            WHERE cs.student_id = ANY($1)
            ORDER BY cs.student_id, c.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut courses = group_by_owner(rows, Course::from);
        for student in &mut students {
            student.courses = courses.remove(&student.id).unwrap_or_default();
        }
        Ok(students)
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, mut student: Student) -> Result<Student, DbError> {
        student.id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO students (name, email) VALUES ($1, $2) RETURNING id",
        )
        .bind(&student.name)
        .bind(&student.email)
        .fetch_one(&self.pool)
        .await?;
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, DbError> {
        sqlx::query("UPDATE students SET name = $1, email = $2 WHERE id = $3")
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.id)
            .execute(&self.pool)
            .await?;
        self.find_by_id(student.id).await
    }

    async fn find_by_id(&self, id: Id) -> Result<Student, DbError> {
        let row = sqlx::query_as::<_, StudentRow>("SELECT id, name, email FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)?;

        let mut loaded = self.load_courses(vec![row.into()]).await?;
        loaded.pop().ok_or(DbError::NotFound)
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Student>, DbError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, email FROM students ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset(page, limit))
        .fetch_all(&self.pool)
        .await?;

        self.load_courses(rows.into_iter().map(Student::from).collect()).await
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn add_course(&self, student_id: Id, course_id: Id) -> Result<(), DbError> {
        // The composite primary key makes a repeated enrollment a no-op.
        sqlx::query(
            "INSERT INTO course_student (course_id, student_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(student_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

use super::{group_by_owner, CourseRow, DepartmentRow, Owned, TeacherRow};
use crate::error::DbError;
use crate::repository::{offset, TeacherRepository};
use async_trait::async_trait;
use core_types::{Course, Department, Id, Teacher};
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct PgTeacherRepository {
    pool: PgPool,
}

impl PgTeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches the courses each teacher teaches and the departments each heads.
    async fn load_relations(&self, mut teachers: Vec<Teacher>) -> Result<Vec<Teacher>, DbError> {
        if teachers.is_empty() {
            return Ok(teachers);
        }
        let ids: Vec<Id> = teachers.iter().map(|t| t.id).collect();

        // The owning teacher is not joined back in: nested entities stay one level deep.
        let course_rows = sqlx::query_as::<_, Owned<CourseRow>>(
            r#"
            SELECT c.teacher_id AS owner_id, c.id, c.title, c.teacher_id, NULL::TEXT AS teacher_name
            FROM courses AS c
            WHERE c.teacher_id = ANY($1)
            ORDER BY c.teacher_id, c.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let department_rows = sqlx::query_as::<_, Owned<DepartmentRow>>(
            r#"
            SELECT d.head_of_department_id AS owner_id, d.id, d.name, d.head_of_department_id,
                   NULL::TEXT AS head_name
            FROM departments AS d
            WHERE d.head_of_department_id = ANY($1)
            ORDER BY d.head_of_department_id, d.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut courses = group_by_owner(course_rows, Course::from);
        let mut departments = group_by_owner(department_rows, Department::from);
        for teacher in &mut teachers {
            teacher.courses = courses.remove(&teacher.id).unwrap_or_default();
            teacher.departments = departments.remove(&teacher.id).unwrap_or_default();
        }
        Ok(teachers)
    }
}

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn save(&self, mut teacher: Teacher) -> Result<Teacher, DbError> {
        teacher.id = sqlx::query_scalar::<_, i64>("INSERT INTO teachers (name) VALUES ($1) RETURNING id")
            .bind(&teacher.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(teacher)
    }

    async fn update(&self, teacher: Teacher) -> Result<Teacher, DbError> {
        sqlx::query("UPDATE teachers SET name = $1 WHERE id = $2")
            .bind(&teacher.name)
            .bind(teacher.id)
            .execute(&self.pool)
            .await?;
        self.find_by_id(teacher.id).await
    }

    async fn find_by_id(&self, id: Id) -> Result<Teacher, DbError> {
        let row = sqlx::query_as::<_, TeacherRow>("SELECT id, name FROM teachers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)?;

        let mut loaded = self.load_relations(vec![row.into()]).await?;
        loaded.pop().ok_or(DbError::NotFound)
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Teacher>, DbError> {
        let rows = sqlx::query_as::<_, TeacherRow>(
            "SELECT id, name FROM teachers ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset(page, limit))
        .fetch_all(&self.pool)
        .await?;

        self.load_relations(rows.into_iter().map(Teacher::from).collect()).await
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        // Courses and departments pointing here fall back to NULL (ON DELETE SET NULL).
        sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

use super::DepartmentRow;
use crate::error::DbError;
use crate::repository::{offset, DepartmentRepository};
use async_trait::async_trait;
use core_types::{Department, Id};
use sqlx::PgPool;

const SELECT_DEPARTMENT: &str = r#"
    SELECT d.id, d.name, d.head_of_department_id, t.name AS head_name
    FROM departments AS d
    LEFT JOIN teachers AS t ON t.id = d.head_of_department_id
"#;

#[derive(Debug, Clone)]
pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn exists_by_id(&self, id: Id) -> Result<bool, DbError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn save(&self, mut department: Department) -> Result<Department, DbError> {
        department.id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO departments (name, head_of_department_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(&department.name)
        .bind(department.head_of_department_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(department)
    }

    async fn update(&self, department: Department) -> Result<Department, DbError> {
        sqlx::query("UPDATE departments SET name = $1 WHERE id = $2")
            .bind(&department.name)
            .bind(department.id)
            .execute(&self.pool)
            .await?;
        self.find_by_id(department.id).await
    }

    async fn find_by_id(&self, id: Id) -> Result<Department, DbError> {
        let row = sqlx::query_as::<_, DepartmentRow>(&format!("{SELECT_DEPARTMENT} WHERE d.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)?;
        Ok(row.into())
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Department>, DbError> {
        let rows = sqlx::query_as::<_, DepartmentRow>(&format!(
            "{SELECT_DEPARTMENT} ORDER BY d.id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset(page, limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Department::from).collect())
    }

    async fn delete_by_id(&self, id: Id) -> Result<(), DbError> {
        sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn set_head(&self, department_id: Id, teacher_id: Id) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE departments SET head_of_department_id = $1 WHERE id = $2")
            .bind(teacher_id)
            .bind(department_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}

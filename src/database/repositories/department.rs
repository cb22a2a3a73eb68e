//! Department repository implementation

use sqlx::PgPool;
use crate::models::department::{Department, DepartmentRequest};
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Department>, RetakeError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT id, name, institute_id FROM department ORDER BY name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Department>, RetakeError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, institute_id FROM department WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Department>, RetakeError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, institute_id FROM department WHERE name = $1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn create(&self, request: &DepartmentRequest) -> Result<Department, RetakeError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO department (name, institute_id)
            VALUES ($1, $2)
            RETURNING id, name, institute_id
            "#
        )
        .bind(request.name.trim())
        .bind(request.institute_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn update(&self, id: i32, request: &DepartmentRequest) -> Result<Option<Department>, RetakeError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE department
            SET name = $2,
                institute_id = $3
            WHERE id = $1
            RETURNING id, name, institute_id
            "#
        )
        .bind(id)
        .bind(request.name.trim())
        .bind(request.institute_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM department WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Institute repository implementation

use sqlx::PgPool;
use crate::models::institute::{Institute, InstituteRequest};
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct InstituteRepository {
    pool: PgPool,
}

impl InstituteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Institute>, RetakeError> {
        let institutes = sqlx::query_as::<_, Institute>("SELECT id, name FROM institute ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(institutes)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Institute>, RetakeError> {
        let institute = sqlx::query_as::<_, Institute>("SELECT id, name FROM institute WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(institute)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Institute>, RetakeError> {
        let institute = sqlx::query_as::<_, Institute>("SELECT id, name FROM institute WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(institute)
    }

    pub async fn create(&self, request: &InstituteRequest) -> Result<Institute, RetakeError> {
        let institute = sqlx::query_as::<_, Institute>(
            "INSERT INTO institute (name) VALUES ($1) RETURNING id, name"
        )
        .bind(request.name.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(institute)
    }

    pub async fn update(&self, id: i32, request: &InstituteRequest) -> Result<Option<Institute>, RetakeError> {
        let institute = sqlx::query_as::<_, Institute>(
            "UPDATE institute SET name = $2 WHERE id = $1 RETURNING id, name"
        )
        .bind(id)
        .bind(request.name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(institute)
    }

    /// Returns false when no row matched
    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM institute WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

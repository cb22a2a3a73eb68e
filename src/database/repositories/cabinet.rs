//! Cabinet repository implementation

use sqlx::PgPool;
use crate::models::cabinet::{Cabinet, CabinetRequest};
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct CabinetRepository {
    pool: PgPool,
}

impl CabinetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Cabinet>, RetakeError> {
        let cabinets = sqlx::query_as::<_, Cabinet>("SELECT id, number FROM cabinet ORDER BY number ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(cabinets)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Cabinet>, RetakeError> {
        let cabinet = sqlx::query_as::<_, Cabinet>("SELECT id, number FROM cabinet WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cabinet)
    }

    pub async fn find_by_number(&self, number: i32) -> Result<Option<Cabinet>, RetakeError> {
        let cabinet = sqlx::query_as::<_, Cabinet>("SELECT id, number FROM cabinet WHERE number = $1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cabinet)
    }

    pub async fn create(&self, request: &CabinetRequest) -> Result<Cabinet, RetakeError> {
        let cabinet = sqlx::query_as::<_, Cabinet>(
            "INSERT INTO cabinet (number) VALUES ($1) RETURNING id, number"
        )
        .bind(request.number)
        .fetch_one(&self.pool)
        .await?;

        Ok(cabinet)
    }

    pub async fn update(&self, id: i32, request: &CabinetRequest) -> Result<Option<Cabinet>, RetakeError> {
        let cabinet = sqlx::query_as::<_, Cabinet>(
            "UPDATE cabinet SET number = $2 WHERE id = $1 RETURNING id, number"
        )
        .bind(id)
        .bind(request.number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cabinet)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM cabinet WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Past retake (history) repository implementation

use sqlx::{PgConnection, PgPool};
use crate::models::retake::{NewPastRetake, PastRetake};
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct PastRetakeRepository {
    pool: PgPool,
}

impl PastRetakeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: i32) -> Result<Vec<PastRetake>, RetakeError> {
        let history = sqlx::query_as::<_, PastRetake>(
            "SELECT id, user_id, date, result, subject FROM past_retake WHERE user_id = $1 ORDER BY date DESC, id DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }

    pub async fn create(&self, record: &NewPastRetake) -> Result<PastRetake, RetakeError> {
        let mut conn = self.pool.acquire().await?;
        self.create_in(&mut conn, record).await
    }

    pub async fn create_in(&self, conn: &mut PgConnection, record: &NewPastRetake) -> Result<PastRetake, RetakeError> {
        let past = sqlx::query_as::<_, PastRetake>(
            r#"
            INSERT INTO past_retake (user_id, date, result, subject)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, date, result, subject
            "#
        )
        .bind(record.user_id)
        .bind(record.date)
        .bind(record.result.as_str())
        .bind(&record.subject)
        .fetch_one(&mut *conn)
        .await?;

        Ok(past)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM past_retake WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Untreated student repository implementation

use sqlx::{PgConnection, PgPool};
use crate::models::retake::UntreatedStudent;
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct UntreatedStudentRepository {
    pool: PgPool,
}

impl UntreatedStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<UntreatedStudent>, RetakeError> {
        let students = sqlx::query_as::<_, UntreatedStudent>("SELECT id, user_id FROM untreated_student ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<UntreatedStudent>, RetakeError> {
        let student = sqlx::query_as::<_, UntreatedStudent>("SELECT id, user_id FROM untreated_student WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<UntreatedStudent>, RetakeError> {
        let student = sqlx::query_as::<_, UntreatedStudent>("SELECT id, user_id FROM untreated_student WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(student)
    }

    pub async fn create_in(&self, conn: &mut PgConnection, user_id: i32) -> Result<UntreatedStudent, RetakeError> {
        let student = sqlx::query_as::<_, UntreatedStudent>(
            "INSERT INTO untreated_student (user_id) VALUES ($1) RETURNING id, user_id"
        )
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(student)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let mut conn = self.pool.acquire().await?;
        self.delete_in(&mut conn, id).await
    }

    pub async fn delete_in(&self, conn: &mut PgConnection, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM untreated_student WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_by_user_in(&self, conn: &mut PgConnection, user_id: i32) -> Result<(), RetakeError> {
        sqlx::query("DELETE FROM untreated_student WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

//! Retake repository implementation

use sqlx::{PgConnection, PgPool};
use crate::models::retake::{Retake, RetakeView};
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct RetakeRepository {
    pool: PgPool,
}

impl RetakeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i32, course_id: i32, attempt: i32) -> Result<Retake, RetakeError> {
        let mut conn = self.pool.acquire().await?;
        self.create_in(&mut conn, user_id, course_id, attempt).await
    }

    pub async fn create_in(&self, conn: &mut PgConnection, user_id: i32, course_id: i32, attempt: i32) -> Result<Retake, RetakeError> {
        let retake = sqlx::query_as::<_, Retake>(
            r#"
            INSERT INTO retake (attempt, course_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, attempt, course_id, user_id
            "#
        )
        .bind(attempt)
        .bind(course_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(retake)
    }

    pub async fn find_all(&self) -> Result<Vec<RetakeView>, RetakeError> {
        let retakes = sqlx::query_as::<_, RetakeView>(
            r#"
            SELECT r.id, r.attempt, r.course_id, c.name AS course_name, r.user_id
            FROM retake r
            INNER JOIN course c ON c.id = r.course_id
            ORDER BY r.user_id ASC, c.name ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(retakes)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Retake>, RetakeError> {
        let retake = sqlx::query_as::<_, Retake>(
            "SELECT id, attempt, course_id, user_id FROM retake WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(retake)
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<RetakeView>, RetakeError> {
        let retakes = sqlx::query_as::<_, RetakeView>(
            r#"
            SELECT r.id, r.attempt, r.course_id, c.name AS course_name, r.user_id
            FROM retake r
            INNER JOIN course c ON c.id = r.course_id
            WHERE r.user_id = $1
            ORDER BY c.name ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(retakes)
    }

    pub async fn find_by_user_and_course(&self, user_id: i32, course_id: i32) -> Result<Option<Retake>, RetakeError> {
        let mut conn = self.pool.acquire().await?;
        self.find_by_user_and_course_in(&mut conn, user_id, course_id).await
    }

    pub async fn find_by_user_and_course_in(&self, conn: &mut PgConnection, user_id: i32, course_id: i32) -> Result<Option<Retake>, RetakeError> {
        let retake = sqlx::query_as::<_, Retake>(
            "SELECT id, attempt, course_id, user_id FROM retake WHERE user_id = $1 AND course_id = $2"
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(retake)
    }

    pub async fn update_attempt(&self, id: i32, attempt: i32) -> Result<Option<Retake>, RetakeError> {
        let mut conn = self.pool.acquire().await?;
        self.update_attempt_in(&mut conn, id, attempt).await
    }

    pub async fn update_attempt_in(&self, conn: &mut PgConnection, id: i32, attempt: i32) -> Result<Option<Retake>, RetakeError> {
        let retake = sqlx::query_as::<_, Retake>(
            "UPDATE retake SET attempt = $2 WHERE id = $1 RETURNING id, attempt, course_id, user_id"
        )
        .bind(id)
        .bind(attempt)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(retake)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let mut conn = self.pool.acquire().await?;
        self.delete_in(&mut conn, id).await
    }

    pub async fn delete_in(&self, conn: &mut PgConnection, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM retake WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

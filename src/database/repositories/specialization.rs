//! Specialization repository implementation

use sqlx::PgPool;
use crate::models::course::Course;
use crate::models::specialization::{Specialization, SpecializationRequest};
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct SpecializationRepository {
    pool: PgPool,
}

impl SpecializationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Specialization>, RetakeError> {
        let specializations = sqlx::query_as::<_, Specialization>(
            "SELECT id, name, code, institute_id FROM specialization ORDER BY code ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(specializations)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Specialization>, RetakeError> {
        let specialization = sqlx::query_as::<_, Specialization>(
            "SELECT id, name, code, institute_id FROM specialization WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(specialization)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Specialization>, RetakeError> {
        let specialization = sqlx::query_as::<_, Specialization>(
            "SELECT id, name, code, institute_id FROM specialization WHERE name = $1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(specialization)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Specialization>, RetakeError> {
        let specialization = sqlx::query_as::<_, Specialization>(
            "SELECT id, name, code, institute_id FROM specialization WHERE code = $1"
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(specialization)
    }

    pub async fn create(&self, request: &SpecializationRequest) -> Result<Specialization, RetakeError> {
        let specialization = sqlx::query_as::<_, Specialization>(
            r#"
            INSERT INTO specialization (name, code, institute_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, code, institute_id
            "#
        )
        .bind(request.name.trim())
        .bind(&request.code)
        .bind(request.institute_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(specialization)
    }

    pub async fn update(&self, id: i32, request: &SpecializationRequest) -> Result<Option<Specialization>, RetakeError> {
        let specialization = sqlx::query_as::<_, Specialization>(
            r#"
            UPDATE specialization
            SET name = $2,
                code = $3,
                institute_id = $4
            WHERE id = $1
            RETURNING id, name, code, institute_id
            "#
        )
        .bind(id)
        .bind(request.name.trim())
        .bind(&request.code)
        .bind(request.institute_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(specialization)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM specialization WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Courses taught within a specialization
    pub async fn courses(&self, id: i32) -> Result<Vec<Course>, RetakeError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT c.id, c.name, c.number, c.semester, c.type
            FROM course c
            INNER JOIN course_specialization cs ON c.id = cs.course_id
            WHERE cs.specialization_id = $1
            ORDER BY c.semester ASC NULLS LAST, c.name ASC
            "#
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }
}

//! Course repository implementation
//!
//! Courses own two join tables, `course_institute` and
//! `course_specialization`; create and update rewrite them in the same
//! transaction as the course row.

use sqlx::{PgConnection, PgPool};
use crate::models::course::{Course, CourseRequest};
use crate::utils::errors::RetakeError;

#[derive(Clone, Debug)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Course>, RetakeError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, name, number, semester, type FROM course ORDER BY name ASC, semester ASC NULLS LAST"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Course>, RetakeError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, name, number, semester, type FROM course WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    /// Find by the natural key; NULL number/semester match NULL
    pub async fn find_by_name_number_semester(
        &self,
        name: &str,
        number: Option<i32>,
        semester: Option<i32>,
    ) -> Result<Option<Course>, RetakeError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, name, number, semester, type
            FROM course
            WHERE name = $1
              AND number IS NOT DISTINCT FROM $2
              AND semester IS NOT DISTINCT FROM $3
            LIMIT 1
            "#
        )
        .bind(name)
        .bind(number)
        .bind(semester)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    /// Number of the given ids that exist in `course`
    pub async fn count_existing(&self, ids: &[i32]) -> Result<i64, RetakeError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM course WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    pub async fn create(&self, request: &CourseRequest) -> Result<Course, RetakeError> {
        let mut tx = self.pool.begin().await?;

        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO course (name, number, semester, type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, number, semester, type
            "#
        )
        .bind(request.name.trim())
        .bind(request.number)
        .bind(request.semester)
        .bind(request.kind.trim())
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_links(&mut tx, course.id, request).await?;
        tx.commit().await?;

        Ok(course)
    }

    pub async fn update(&self, id: i32, request: &CourseRequest) -> Result<Option<Course>, RetakeError> {
        let mut tx = self.pool.begin().await?;

        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE course
            SET name = $2,
                number = $3,
                semester = $4,
                type = $5
            WHERE id = $1
            RETURNING id, name, number, semester, type
            "#
        )
        .bind(id)
        .bind(request.name.trim())
        .bind(request.number)
        .bind(request.semester)
        .bind(request.kind.trim())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(course) = course else {
            return Ok(None);
        };

        Self::replace_links(&mut tx, course.id, request).await?;
        tx.commit().await?;

        Ok(Some(course))
    }

    async fn replace_links(conn: &mut PgConnection, course_id: i32, request: &CourseRequest) -> Result<(), RetakeError> {
        sqlx::query("DELETE FROM course_institute WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut *conn)
            .await?;
        sqlx::query("DELETE FROM course_specialization WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO course_institute (course_id, institute_id)
            SELECT $1, UNNEST($2::int[])
            ON CONFLICT DO NOTHING
            "#
        )
        .bind(course_id)
        .bind(&request.institute_ids)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO course_specialization (course_id, specialization_id)
            SELECT $1, UNNEST($2::int[])
            ON CONFLICT DO NOTHING
            "#
        )
        .bind(course_id)
        .bind(&request.specialization_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM course WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn institute_ids(&self, course_id: i32) -> Result<Vec<i32>, RetakeError> {
        let ids = sqlx::query_scalar::<_, i32>(
            "SELECT institute_id FROM course_institute WHERE course_id = $1 ORDER BY institute_id"
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn specialization_ids(&self, course_id: i32) -> Result<Vec<i32>, RetakeError> {
        let ids = sqlx::query_scalar::<_, i32>(
            "SELECT specialization_id FROM course_specialization WHERE course_id = $1 ORDER BY specialization_id"
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

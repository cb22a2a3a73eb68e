//! Event repository implementation

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use crate::models::event::{Event, EventRequest, EventView};
use crate::models::user::User;
use crate::utils::errors::RetakeError;

const EVENT_VIEW_SELECT: &str = r#"
    SELECT e.id, e.date, e.number, e.count, e.course_id, c.name AS course_name,
           e.teacher_id, u.surname || ' ' || u.name || ' ' || u.lastname AS teacher_name,
           e.cabinet_id, cab.number AS cabinet_number
    FROM event e
    INNER JOIN course c ON c.id = e.course_id
    LEFT JOIN app_user u ON u.id = e.teacher_id
    LEFT JOIN cabinet cab ON cab.id = e.cabinet_id
"#;

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &EventRequest) -> Result<Event, RetakeError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO event (date, number, count, course_id, teacher_id, cabinet_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, date, number, count, course_id, teacher_id, cabinet_id
            "#
        )
        .bind(request.date)
        .bind(request.number)
        .bind(request.count)
        .bind(request.course_id)
        .bind(request.teacher_id)
        .bind(request.cabinet_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, RetakeError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, date, number, count, course_id, teacher_id, cabinet_id FROM event WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Lock the event row for the rest of the transaction
    pub async fn find_by_id_for_update(&self, conn: &mut PgConnection, id: i32) -> Result<Option<Event>, RetakeError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, date, number, count, course_id, teacher_id, cabinet_id FROM event WHERE id = $1 FOR UPDATE"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(event)
    }

    pub async fn find_view_by_id(&self, id: i32) -> Result<Option<EventView>, RetakeError> {
        let event = sqlx::query_as::<_, EventView>(&format!("{} WHERE e.id = $1", EVENT_VIEW_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    pub async fn find_all_views(&self) -> Result<Vec<EventView>, RetakeError> {
        let events = sqlx::query_as::<_, EventView>(&format!("{} ORDER BY e.date ASC, e.number ASC", EVENT_VIEW_SELECT))
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// Event occupying a cabinet at a date and lesson slot
    pub async fn find_by_slot(&self, date: NaiveDate, number: i32, cabinet_id: i32) -> Result<Option<Event>, RetakeError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, date, number, count, course_id, teacher_id, cabinet_id
            FROM event
            WHERE date = $1 AND number = $2 AND cabinet_id = $3
            "#
        )
        .bind(date)
        .bind(number)
        .bind(cabinet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn update(&self, id: i32, request: &EventRequest) -> Result<Option<Event>, RetakeError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE event
            SET date = $2,
                number = $3,
                count = $4,
                course_id = $5,
                teacher_id = $6,
                cabinet_id = $7
            WHERE id = $1
            RETURNING id, date, number, count, course_id, teacher_id, cabinet_id
            "#
        )
        .bind(id)
        .bind(request.date)
        .bind(request.number)
        .bind(request.count)
        .bind(request.course_id)
        .bind(request.teacher_id)
        .bind(request.cabinet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, RetakeError> {
        let result = sqlx::query("DELETE FROM event WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_in(&self, conn: &mut PgConnection, id: i32) -> Result<(), RetakeError> {
        sqlx::query("DELETE FROM event WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Events of a course that still have free seats
    pub async fn find_open_by_course(&self, course_id: i32) -> Result<Vec<EventView>, RetakeError> {
        let events = sqlx::query_as::<_, EventView>(&format!(
            "{} WHERE e.course_id = $1 AND e.count > 0 ORDER BY e.date ASC, e.number ASC",
            EVENT_VIEW_SELECT
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_teacher(&self, teacher_id: i32) -> Result<Vec<EventView>, RetakeError> {
        let events = sqlx::query_as::<_, EventView>(&format!(
            "{} WHERE e.teacher_id = $1 ORDER BY e.date ASC, e.number ASC",
            EVENT_VIEW_SELECT
        ))
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Events a student is signed up for
    pub async fn find_by_student(&self, user_id: i32) -> Result<Vec<EventView>, RetakeError> {
        let events = sqlx::query_as::<_, EventView>(&format!(
            "{} INNER JOIN user_event ue ON ue.event_id = e.id WHERE ue.user_id = $1 ORDER BY e.date ASC, e.number ASC",
            EVENT_VIEW_SELECT
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Distinct courses a student holds an event sign-up for
    pub async fn registered_course_ids(&self, user_id: i32) -> Result<Vec<i32>, RetakeError> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT DISTINCT e.course_id
            FROM event e
            INNER JOIN user_event ue ON ue.event_id = e.id
            WHERE ue.user_id = $1
            ORDER BY e.course_id
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn students(&self, event_id: i32) -> Result<Vec<User>, RetakeError> {
        let students = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.surname, u.lastname, u.login, u.email, u.password, u.role, u.department_id, u.specialization_id
            FROM app_user u
            INNER JOIN user_event ue ON ue.user_id = u.id
            WHERE ue.event_id = $1
            ORDER BY u.surname ASC, u.name ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    pub async fn student_ids_in(&self, conn: &mut PgConnection, event_id: i32) -> Result<Vec<i32>, RetakeError> {
        let ids = sqlx::query_scalar::<_, i32>("SELECT user_id FROM user_event WHERE event_id = $1")
            .bind(event_id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(ids)
    }

    pub async fn is_registered_in(&self, conn: &mut PgConnection, event_id: i32, user_id: i32) -> Result<bool, RetakeError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_event WHERE event_id = $1 AND user_id = $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count.0 > 0)
    }

    pub async fn add_student_in(&self, conn: &mut PgConnection, event_id: i32, user_id: i32) -> Result<(), RetakeError> {
        sqlx::query("INSERT INTO user_event (event_id, user_id) VALUES ($1, $2)")
            .bind(event_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn remove_student_in(&self, conn: &mut PgConnection, event_id: i32, user_id: i32) -> Result<(), RetakeError> {
        sqlx::query("DELETE FROM user_event WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Take one free seat; `None` when the event is already full
    pub async fn take_seat_in(&self, conn: &mut PgConnection, event_id: i32) -> Result<Option<i32>, RetakeError> {
        let remaining = sqlx::query_scalar::<_, i32>(
            "UPDATE event SET count = count - 1 WHERE id = $1 AND count > 0 RETURNING count"
        )
        .bind(event_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(remaining)
    }
}

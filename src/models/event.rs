//! Event model
//!
//! An event is a scheduled retake session: a date and lesson slot in a
//! cabinet, run by a teacher for one course, with a number of free seats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub date: NaiveDate,
    /// Lesson number within the day (1..=6)
    pub number: i32,
    /// Free seats left
    pub count: i32,
    pub course_id: i32,
    pub teacher_id: Option<i32>,
    pub cabinet_id: Option<i32>,
}

/// Event joined with the names needed to display it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventView {
    pub id: i32,
    pub date: NaiveDate,
    pub number: i32,
    pub count: i32,
    pub course_id: i32,
    pub course_name: String,
    pub teacher_id: Option<i32>,
    pub teacher_name: Option<String>,
    pub cabinet_id: Option<i32>,
    pub cabinet_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    pub date: NaiveDate,
    pub number: i32,
    pub count: i32,
    pub course_id: i32,
    pub teacher_id: i32,
    pub cabinet_id: i32,
}

/// Student sign-up for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignEventRequest {
    pub user_id: i32,
    pub event_id: i32,
}

/// Outcome of a student's retake attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetakeOutcome {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub user_id: i32,
    pub outcome: RetakeOutcome,
}

/// Results of a held event, submitted by its teacher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRetakesRequest {
    pub event_id: i32,
    pub marks: Vec<AttendanceMark>,
}

/// What happened to each student after results were submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRetakesSummary {
    pub passed: Vec<i32>,
    pub failed: Vec<i32>,
    pub expelled: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_retakes_request_deserializes_outcomes() {
        let json = r#"{"event_id": 4, "marks": [{"user_id": 1, "outcome": "pass"}, {"user_id": 2, "outcome": "fail"}]}"#;
        let request: CheckRetakesRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.event_id, 4);
        assert_eq!(request.marks[0].outcome, RetakeOutcome::Pass);
        assert_eq!(request.marks[1].outcome, RetakeOutcome::Fail);
    }

    #[test]
    fn test_unknown_outcome_is_rejected() {
        let json = r#"{"user_id": 1, "outcome": "maybe"}"#;
        assert!(serde_json::from_str::<AttendanceMark>(json).is_err());
    }

    #[test]
    fn test_event_request_parses_iso_date() {
        let json = r#"{"date": "2024-06-14", "number": 2, "count": 10, "course_id": 1, "teacher_id": 2, "cabinet_id": 3}"#;
        let request: EventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.date, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
    }
}

//! Retake, past retake and untreated student models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::course::Course;
use super::user::UserProfile;

/// An outstanding retake of a course by a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Retake {
    pub id: i32,
    /// Attempts left (1..=5)
    pub attempt: i32,
    pub course_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RetakeView {
    pub id: i32,
    pub attempt: i32,
    pub course_id: i32,
    pub course_name: String,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRetakeRequest {
    pub course_id: i32,
    pub attempt: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRetakeRequest {
    pub attempt: i32,
}

/// Courses to assign to an untreated student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetakeAssignment {
    pub course_ids: Vec<i32>,
}

/// Archived outcome of a retake session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PastRetake {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub result: String,
    /// Course name at the time of the session
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct NewPastRetake {
    pub user_id: i32,
    pub date: NaiveDate,
    pub result: PastRetakeResult,
    pub subject: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PastRetakeResult {
    Passed,
    Failed,
}

impl PastRetakeResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            PastRetakeResult::Passed => "passed",
            PastRetakeResult::Failed => "failed",
        }
    }
}

/// A registered student still waiting for retake assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UntreatedStudent {
    pub id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UntreatedStudentDetails {
    pub id: i32,
    pub user: UserProfile,
    /// Courses of the student's specialization, the assignment candidates
    pub courses: Vec<Course>,
}

/// Everything an admin or the student sees about their retakes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetakesInfo {
    pub user: UserProfile,
    pub untreated: bool,
    pub retakes: Vec<RetakeView>,
    /// Courses the student already holds an event sign-up for
    pub registered_course_ids: Vec<i32>,
}

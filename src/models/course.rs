//! Course model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub number: Option<i32>,
    pub semester: Option<i32>,
    /// Attestation type (exam, credit, ...)
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

/// A course together with the institutes and specializations it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub institute_ids: Vec<i32>,
    pub specialization_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRequest {
    pub name: String,
    pub number: Option<i32>,
    pub semester: Option<i32>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub institute_ids: Vec<i32>,
    #[serde(default)]
    pub specialization_ids: Vec<i32>,
}

//! Specialization model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Specialization {
    pub id: i32,
    pub name: String,
    /// Six digits in three dotted pairs, e.g. `09.03.04`
    pub code: String,
    pub institute_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationRequest {
    pub name: String,
    pub code: String,
    pub institute_id: Option<i32>,
}

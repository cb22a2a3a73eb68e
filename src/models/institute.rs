//! Institute model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Institute {
    pub id: i32,
    pub name: String,
}

/// Payload for creating or renaming an institute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstituteRequest {
    pub name: String,
}

//! Cabinet (room) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Cabinet {
    pub id: i32,
    pub number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabinetRequest {
    pub number: i32,
}

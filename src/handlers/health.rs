//! Health check handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crate::services::ServiceHealthStatus;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ServiceHealthStatus>) {
    let status = state.services.health_check().await;
    if status.is_healthy() {
        (StatusCode::OK, Json(status))
    } else {
        tracing::warn!(issues = ?status.get_issues(), "Health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, Json(status))
    }
}

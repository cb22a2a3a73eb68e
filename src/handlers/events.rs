//! Event and retake assignment handlers
//!
//! Admin-only scheduling of retake events, assignment of retakes to
//! untreated students and the untreated-student queue.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use crate::models::{
    EventRequest, EventView, Retake, RetakeAssignment, RetakeView, UntreatedStudentDetails,
    UserProfile,
};
use crate::services::Actor;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/teachers", get(list_teachers))
        .route("/events/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/retakes", get(list_retakes))
        .route("/retakes/:id", post(assign_retakes))
        .route("/untreatedStudents", get(list_untreated))
        .route("/untreatedStudents/:id", get(get_untreated).delete(delete_untreated))
}

async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventView>>> {
    Ok(Json(state.services.events.find_all().await?))
}

/// Candidates for an event's teacher
async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>> {
    Ok(Json(state.services.registration.find_teachers().await?))
}

async fn get_event(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<EventView>> {
    Ok(Json(state.services.events.find_by_id(id).await?))
}

async fn create_event(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventView>)> {
    let event = state.services.events.create(&request).await?;
    log_admin_action(actor.id, "create_event", Some(&format!("event:{}", event.id)), None);
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<EventRequest>,
) -> Result<Json<EventView>> {
    let event = state.services.events.update(id, &request).await?;
    log_admin_action(actor.id, "update_event", Some(&format!("event:{}", id)), None);
    Ok(Json(event))
}

async fn delete_event(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.events.delete(id).await?;
    log_admin_action(actor.id, "delete_event", Some(&format!("event:{}", id)), None);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_retakes(State(state): State<AppState>) -> Result<Json<Vec<RetakeView>>> {
    Ok(Json(state.services.retakes.find_all().await?))
}

/// `id` is the untreated-student record, not a retake
async fn assign_retakes(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(untreated_id): Path<i32>,
    Json(assignment): Json<RetakeAssignment>,
) -> Result<(StatusCode, Json<Vec<Retake>>)> {
    let retakes = state.services.retakes.assign(actor.id, untreated_id, &assignment).await?;
    Ok((StatusCode::CREATED, Json(retakes)))
}

async fn list_untreated(State(state): State<AppState>) -> Result<Json<Vec<UntreatedStudentDetails>>> {
    Ok(Json(state.services.untreated.find_all().await?))
}

async fn get_untreated(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<UntreatedStudentDetails>> {
    Ok(Json(state.services.untreated.find_by_id(id).await?))
}

async fn delete_untreated(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.untreated.delete(id).await?;
    log_admin_action(actor.id, "delete_untreated_student", Some(&format!("untreated:{}", id)), None);
    Ok(StatusCode::NO_CONTENT)
}

//! Account and retake lifecycle handlers
//!
//! Everything under `/auth`: registration, profiles, a student's retakes and
//! event sign-ups, and a teacher's grading of held events. Admin-only paths
//! are guarded in the middleware; per-user checks happen here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use crate::models::{
    CheckRetakesRequest, CheckRetakesSummary, CreateRetakeRequest, EventView, PastRetake, Retake,
    RetakeView, RetakesInfo, SignEventRequest, UpdateRetakeRequest, UserProfile, UserRequest,
};
use crate::services::Actor;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/registerAdmin", post(register_admin))
        .route("/auth/profiles", get(list_profiles))
        .route("/auth/profile", get(own_profile))
        .route("/auth/profile/:id", get(get_profile).put(update_profile).delete(delete_profile))
        .route("/auth/retakesInfo/:id", get(retakes_info))
        .route("/auth/profileInfo/:id/retakes", get(user_retakes).post(create_retake))
        .route("/auth/profileInfo/:id/:user_id", put(update_retake).delete(delete_retake))
        .route("/auth/teacherRetakes/:id", get(teacher_events))
        .route("/auth/signRetake/:retake_id/:user_id", get(available_events))
        .route("/auth/signEvent", post(sign_event))
        .route("/auth/userEvents/:id", get(user_events))
        .route("/auth/checkRetake/:event_id", get(event_students))
        .route("/auth/checkRetakes", post(check_retakes))
        .route("/auth/pastRetakes/:id", get(past_retakes))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let profile = state.services.registration.register(&request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn register_admin(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let profile = state.services.registration.register_admin(&request).await?;
    log_admin_action(actor.id, "register_admin", Some(&format!("user:{}", profile.id)), None);
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>> {
    Ok(Json(state.services.registration.find_all().await?))
}

async fn own_profile(State(state): State<AppState>, Extension(actor): Extension<Actor>) -> Result<Json<UserProfile>> {
    Ok(Json(state.services.registration.find_by_id(actor.id).await?))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<Json<UserProfile>> {
    state.services.access.require_admin_or_self(&actor, id)?;
    Ok(Json(state.services.registration.find_by_id(id).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<UserRequest>,
) -> Result<Json<UserProfile>> {
    state.services.access.require_admin_or_self(&actor, id)?;
    Ok(Json(state.services.registration.update(id, &request).await?))
}

async fn delete_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.access.require_admin_or_self(&actor, id)?;
    state.services.registration.delete(id).await?;
    if actor.id != id {
        log_admin_action(actor.id, "delete_user", Some(&format!("user:{}", id)), None);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn retakes_info(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<Json<RetakesInfo>> {
    state.services.access.require_admin_or_self(&actor, id)?;
    Ok(Json(state.services.retakes.retakes_info(id).await?))
}

async fn user_retakes(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<RetakeView>>> {
    Ok(Json(state.services.retakes.find_by_user(id).await?))
}

async fn create_retake(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<CreateRetakeRequest>,
) -> Result<(StatusCode, Json<Retake>)> {
    let retake = state.services.retakes.create(id, &request).await?;
    log_admin_action(actor.id, "create_retake", Some(&format!("user:{}", id)), None);
    Ok((StatusCode::CREATED, Json(retake)))
}

async fn update_retake(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((retake_id, user_id)): Path<(i32, i32)>,
    Json(request): Json<UpdateRetakeRequest>,
) -> Result<Json<Retake>> {
    let retake = state.services.retakes.update(retake_id, user_id, &request).await?;
    log_admin_action(
        actor.id,
        "update_retake",
        Some(&format!("retake:{}", retake_id)),
        Some(&format!("attempt={}", retake.attempt)),
    );
    Ok(Json(retake))
}

async fn delete_retake(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((retake_id, user_id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    state.services.retakes.delete(retake_id, user_id).await?;
    log_admin_action(actor.id, "delete_retake", Some(&format!("retake:{}", retake_id)), None);
    Ok(StatusCode::NO_CONTENT)
}

async fn teacher_events(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<EventView>>> {
    state.services.access.require_admin_or_self(&actor, id)?;
    Ok(Json(state.services.registration.find_teacher_events(id).await?))
}

/// Open events a student may sign up for with one of their retakes
async fn available_events(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((retake_id, user_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<EventView>>> {
    state.services.access.require_admin_or_self(&actor, user_id)?;
    Ok(Json(state.services.retakes.available_events(retake_id, user_id).await?))
}

async fn sign_event(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<SignEventRequest>,
) -> Result<Json<EventView>> {
    state.services.access.require_admin_or_self(&actor, request.user_id)?;
    Ok(Json(state.services.registration.sign_event(&request).await?))
}

async fn user_events(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<EventView>>> {
    state.services.access.require_admin_or_self(&actor, id)?;
    Ok(Json(state.services.registration.find_student_events(id).await?))
}

/// Students to grade at an event
async fn event_students(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(event_id): Path<i32>,
) -> Result<Json<Vec<UserProfile>>> {
    state.services.access.require_event_teacher_or_admin(&actor, event_id).await?;
    Ok(Json(state.services.events.event_students(event_id).await?))
}

async fn check_retakes(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CheckRetakesRequest>,
) -> Result<Json<CheckRetakesSummary>> {
    state.services.access.require_event_teacher_or_admin(&actor, request.event_id).await?;
    Ok(Json(state.services.events.submit_retakes(&request).await?))
}

async fn past_retakes(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<PastRetake>>> {
    state.services.access.require_admin_or_self(&actor, id)?;
    Ok(Json(state.services.past_retakes.find_all_by_user(id).await?))
}

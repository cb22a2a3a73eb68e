//! Catalog handlers
//!
//! Admin-only CRUD over institutes, departments, specializations, courses and
//! cabinets. The admin guard runs in the authentication middleware.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use crate::models::{
    Cabinet, CabinetRequest, Course, CourseDetails, CourseRequest, Department, DepartmentRequest,
    Institute, InstituteRequest, Specialization, SpecializationRequest,
};
use crate::services::Actor;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/institutes", get(list_institutes).post(create_institute))
        .route("/institutes/:id", get(get_institute).put(update_institute).delete(delete_institute))
        .route("/departments", get(list_departments).post(create_department))
        .route("/departments/:id", get(get_department).put(update_department).delete(delete_department))
        .route("/specializations", get(list_specializations).post(create_specialization))
        .route(
            "/specializations/:id",
            get(get_specialization).put(update_specialization).delete(delete_specialization),
        )
        .route("/specializations/:id/courses", get(specialization_courses))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/:id", get(get_course).put(update_course).delete(delete_course))
        .route("/cabinets", get(list_cabinets).post(create_cabinet))
        .route("/cabinets/:id", get(get_cabinet).put(update_cabinet).delete(delete_cabinet))
}

fn audit(actor: &Actor, action: &str, target: String) {
    log_admin_action(actor.id, action, Some(&target), None);
}

// Institutes

async fn list_institutes(State(state): State<AppState>) -> Result<Json<Vec<Institute>>> {
    Ok(Json(state.services.institutes.find_all().await?))
}

async fn get_institute(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Institute>> {
    Ok(Json(state.services.institutes.find_by_id(id).await?))
}

async fn create_institute(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<InstituteRequest>,
) -> Result<(StatusCode, Json<Institute>)> {
    let institute = state.services.institutes.create(&request).await?;
    audit(&actor, "create_institute", format!("institute:{}", institute.id));
    Ok((StatusCode::CREATED, Json(institute)))
}

async fn update_institute(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<InstituteRequest>,
) -> Result<Json<Institute>> {
    let institute = state.services.institutes.update(id, &request).await?;
    audit(&actor, "update_institute", format!("institute:{}", id));
    Ok(Json(institute))
}

async fn delete_institute(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.institutes.delete(id).await?;
    audit(&actor, "delete_institute", format!("institute:{}", id));
    Ok(StatusCode::NO_CONTENT)
}

// Departments

async fn list_departments(State(state): State<AppState>) -> Result<Json<Vec<Department>>> {
    Ok(Json(state.services.departments.find_all().await?))
}

async fn get_department(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Department>> {
    Ok(Json(state.services.departments.find_by_id(id).await?))
}

async fn create_department(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<DepartmentRequest>,
) -> Result<(StatusCode, Json<Department>)> {
    let department = state.services.departments.create(&request).await?;
    audit(&actor, "create_department", format!("department:{}", department.id));
    Ok((StatusCode::CREATED, Json(department)))
}

async fn update_department(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<DepartmentRequest>,
) -> Result<Json<Department>> {
    let department = state.services.departments.update(id, &request).await?;
    audit(&actor, "update_department", format!("department:{}", id));
    Ok(Json(department))
}

async fn delete_department(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.departments.delete(id).await?;
    audit(&actor, "delete_department", format!("department:{}", id));
    Ok(StatusCode::NO_CONTENT)
}

// Specializations

async fn list_specializations(State(state): State<AppState>) -> Result<Json<Vec<Specialization>>> {
    Ok(Json(state.services.specializations.find_all().await?))
}

async fn get_specialization(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Specialization>> {
    Ok(Json(state.services.specializations.find_by_id(id).await?))
}

async fn specialization_courses(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Vec<Course>>> {
    Ok(Json(state.services.specializations.courses(id).await?))
}

async fn create_specialization(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<SpecializationRequest>,
) -> Result<(StatusCode, Json<Specialization>)> {
    let specialization = state.services.specializations.create(&request).await?;
    audit(&actor, "create_specialization", format!("specialization:{}", specialization.id));
    Ok((StatusCode::CREATED, Json(specialization)))
}

async fn update_specialization(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<SpecializationRequest>,
) -> Result<Json<Specialization>> {
    let specialization = state.services.specializations.update(id, &request).await?;
    audit(&actor, "update_specialization", format!("specialization:{}", id));
    Ok(Json(specialization))
}

async fn delete_specialization(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.specializations.delete(id).await?;
    audit(&actor, "delete_specialization", format!("specialization:{}", id));
    Ok(StatusCode::NO_CONTENT)
}

// Courses

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>> {
    Ok(Json(state.services.courses.find_all().await?))
}

async fn get_course(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<CourseDetails>> {
    Ok(Json(state.services.courses.find_by_id(id).await?))
}

async fn create_course(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseDetails>)> {
    let course = state.services.courses.create(&request).await?;
    audit(&actor, "create_course", format!("course:{}", course.course.id));
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<CourseRequest>,
) -> Result<Json<CourseDetails>> {
    let course = state.services.courses.update(id, &request).await?;
    audit(&actor, "update_course", format!("course:{}", id));
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.courses.delete(id).await?;
    audit(&actor, "delete_course", format!("course:{}", id));
    Ok(StatusCode::NO_CONTENT)
}

// Cabinets

async fn list_cabinets(State(state): State<AppState>) -> Result<Json<Vec<Cabinet>>> {
    Ok(Json(state.services.cabinets.find_all().await?))
}

async fn get_cabinet(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Cabinet>> {
    Ok(Json(state.services.cabinets.find_by_id(id).await?))
}

async fn create_cabinet(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CabinetRequest>,
) -> Result<(StatusCode, Json<Cabinet>)> {
    let cabinet = state.services.cabinets.create(&request).await?;
    audit(&actor, "create_cabinet", format!("cabinet:{}", cabinet.id));
    Ok((StatusCode::CREATED, Json(cabinet)))
}

async fn update_cabinet(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    Json(request): Json<CabinetRequest>,
) -> Result<Json<Cabinet>> {
    let cabinet = state.services.cabinets.update(id, &request).await?;
    audit(&actor, "update_cabinet", format!("cabinet:{}", id));
    Ok(Json(cabinet))
}

async fn delete_cabinet(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.services.cabinets.delete(id).await?;
    audit(&actor, "delete_cabinet", format!("cabinet:{}", id));
    Ok(StatusCode::NO_CONTENT)
}

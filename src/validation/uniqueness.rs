//! Uniqueness rules backed by repository lookups
//!
//! Each check takes the id of the entity being updated (`None` on create) so
//! an entity may keep its own values.

use super::{clashes, ValidationErrors};
use crate::database::DatabaseService;
use crate::models::{
    CabinetRequest, CourseRequest, DepartmentRequest, EventRequest, InstituteRequest,
    SpecializationRequest, UserRequest,
};
use crate::utils::errors::Result;

pub async fn check_institute(db: &DatabaseService, request: &InstituteRequest, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let existing = db.institutes.find_by_name(request.name.trim()).await?;
    if clashes(existing.map(|i| i.id), current) {
        errors.reject("name", "An institute with this name already exists");
    }
    Ok(errors)
}

pub async fn check_department(db: &DatabaseService, request: &DepartmentRequest, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let existing = db.departments.find_by_name(request.name.trim()).await?;
    if clashes(existing.map(|d| d.id), current) {
        errors.reject("name", "A department with this name already exists");
    }
    Ok(errors)
}

pub async fn check_specialization(db: &DatabaseService, request: &SpecializationRequest, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let by_name = db.specializations.find_by_name(request.name.trim()).await?;
    if clashes(by_name.map(|s| s.id), current) {
        errors.reject("name", "A specialization with this name already exists");
    }

    let by_code = db.specializations.find_by_code(&request.code).await?;
    if clashes(by_code.map(|s| s.id), current) {
        errors.reject("code", "A specialization with this code already exists");
    }

    Ok(errors)
}

pub async fn check_course(db: &DatabaseService, request: &CourseRequest, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let existing = db
        .courses
        .find_by_name_number_semester(request.name.trim(), request.number, request.semester)
        .await?;
    if clashes(existing.map(|c| c.id), current) {
        errors.reject("name", "This course already exists for the given number and semester");
    }
    Ok(errors)
}

pub async fn check_cabinet(db: &DatabaseService, request: &CabinetRequest, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let existing = db.cabinets.find_by_number(request.number).await?;
    if clashes(existing.map(|c| c.id), current) {
        errors.reject("number", "A cabinet with this number already exists");
    }
    Ok(errors)
}

pub async fn check_event(db: &DatabaseService, request: &EventRequest, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let existing = db
        .events
        .find_by_slot(request.date, request.number, request.cabinet_id)
        .await?;
    if clashes(existing.map(|e| e.id), current) {
        errors.reject("cabinet_id", "This cabinet already has a retake at this time");
    }
    Ok(errors)
}

pub async fn check_user(db: &DatabaseService, request: &UserRequest, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let by_login = db.users.find_by_login(request.login.trim()).await?;
    if clashes(by_login.map(|u| u.id), current) {
        errors.reject("login", "This login is already taken");
    }

    let by_email = db.users.find_by_email(request.email.trim()).await?;
    if clashes(by_email.map(|u| u.id), current) {
        errors.reject("email", "This e-mail is already registered");
    }

    Ok(errors)
}

/// A student holds at most one retake per course
pub async fn check_retake(db: &DatabaseService, user_id: i32, course_id: i32, current: Option<i32>) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let existing = db.retakes.find_by_user_and_course(user_id, course_id).await?;
    if clashes(existing.map(|r| r.id), current) {
        errors.reject("course_id", "The student already has a retake for this course");
    }
    Ok(errors)
}

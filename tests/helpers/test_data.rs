//! Test data helpers
//!
//! Builders for request payloads with generated names, plus a small catalog
//! fixture most lifecycle tests start from.

use chrono::NaiveDate;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use std::sync::atomic::{AtomicU32, Ordering};
use RetakeManager::models::{
    CabinetRequest, CourseRequest, EventRequest, InstituteRequest, Role, SpecializationRequest,
    UserRequest,
};

static SEQUENCE: AtomicU32 = AtomicU32::new(1);

fn next_id() -> u32 {
    SEQUENCE.fetch_add(1, Ordering::SeqCst)
}

/// A valid registration payload with unique login and e-mail
pub fn user_request(role: Role) -> UserRequest {
    let n = next_id();
    let name: String = FirstName().fake();
    let email: String = SafeEmail().fake();
    UserRequest {
        name: name.clone(),
        surname: LastName().fake(),
        lastname: FirstName().fake(),
        login: format!("{}{}", name.to_lowercase(), n),
        email: format!("{}.{}", n, email),
        password: "Secret123".to_string(),
        role: Some(role),
        department_id: None,
        specialization_id: None,
    }
}

pub fn institute_request(name: &str) -> InstituteRequest {
    InstituteRequest { name: name.to_string() }
}

pub fn specialization_request(name: &str, code: &str, institute_id: Option<i32>) -> SpecializationRequest {
    SpecializationRequest {
        name: name.to_string(),
        code: code.to_string(),
        institute_id,
    }
}

pub fn course_request(name: &str, institute_id: i32, specialization_id: i32) -> CourseRequest {
    CourseRequest {
        name: name.to_string(),
        number: Some(1),
        semester: Some(2),
        kind: "exam".to_string(),
        institute_ids: vec![institute_id],
        specialization_ids: vec![specialization_id],
    }
}

pub fn cabinet_request(number: i32) -> CabinetRequest {
    CabinetRequest { number }
}

pub fn retake_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 14).expect("valid date")
}

pub fn event_request(course_id: i32, teacher_id: i32, cabinet_id: i32, number: i32, count: i32) -> EventRequest {
    EventRequest {
        date: retake_date(),
        number,
        count,
        course_id,
        teacher_id,
        cabinet_id,
    }
}

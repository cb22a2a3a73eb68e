//! Field rules for request payloads

use regex::Regex;
use std::sync::OnceLock;

use super::ValidationErrors;
use crate::models::{
    CabinetRequest, CourseRequest, CreateRetakeRequest, DepartmentRequest, EventRequest,
    InstituteRequest, SpecializationRequest, UserRequest,
};

pub const MAX_CABINET_NUMBER: i32 = 1000;
pub const MAX_LESSON_NUMBER: i32 = 6;
pub const MAX_EVENT_SEATS: i32 = 30;
pub const MAX_ATTEMPTS: i32 = 5;

fn specialization_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d\d\.\d\d\.\d\d$").expect("valid specialization code regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn require_text(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.reject(field, message);
    }
}

pub fn check_institute(request: &InstituteRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    require_text(&mut errors, "name", &request.name, "Institute name must not be empty");
    errors
}

pub fn check_department(request: &DepartmentRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    require_text(&mut errors, "name", &request.name, "Department name must not be empty");
    errors
}

pub fn check_specialization(request: &SpecializationRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    require_text(&mut errors, "name", &request.name, "Specialization name must not be empty");

    if request.code.is_empty() {
        errors.reject("code", "Code must not be empty");
    } else {
        if request.code.chars().count() != 8 {
            errors.reject("code", "Code must be 8 characters long");
        }
        if !specialization_code_pattern().is_match(&request.code) {
            errors.reject("code", "Code must be six digits in dot-separated pairs");
        }
    }

    errors
}

pub fn check_course(request: &CourseRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    require_text(&mut errors, "name", &request.name, "Course name must not be empty");
    require_text(&mut errors, "type", &request.kind, "Attestation type must not be empty");

    if request.institute_ids.is_empty() {
        errors.reject("institute_ids", "A course needs at least one institute");
    }
    if request.specialization_ids.is_empty() {
        errors.reject("specialization_ids", "A course needs at least one specialization");
    }

    errors
}

pub fn check_cabinet(request: &CabinetRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if request.number < 1 {
        errors.reject("number", "Cabinet number must be positive");
    } else if request.number > MAX_CABINET_NUMBER {
        errors.reject("number", "Cabinet number must not exceed 1000");
    }
    errors
}

pub fn check_event(request: &EventRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if request.number < 1 {
        errors.reject("number", "Lesson number must be positive");
    } else if request.number > MAX_LESSON_NUMBER {
        errors.reject("number", "Lesson number cannot exceed 6");
    }

    if request.count < 0 {
        errors.reject("count", "Free seats must not be negative");
    } else if request.count > MAX_EVENT_SEATS {
        errors.reject("count", "Free seats cannot exceed 30");
    }

    errors
}

pub fn check_user(request: &UserRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    require_text(&mut errors, "name", &request.name, "Name must not be empty");
    require_text(&mut errors, "surname", &request.surname, "Surname must not be empty");
    require_text(&mut errors, "lastname", &request.lastname, "Patronymic must not be empty");
    require_text(&mut errors, "login", &request.login, "Login must not be empty");
    require_text(&mut errors, "password", &request.password, "Password must not be empty");

    if request.email.trim().is_empty() {
        errors.reject("email", "E-mail must not be empty");
    } else if !email_pattern().is_match(&request.email) {
        errors.reject("email", "E-mail does not match the e-mail format");
    }

    errors
}

pub fn check_attempt(attempt: i32, max_attempts: i32) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if attempt < 1 {
        errors.reject("attempt", "At least 1 attempt is required");
    } else if attempt > max_attempts.min(MAX_ATTEMPTS) {
        errors.reject("attempt", &format!("No more than {} attempts allowed", max_attempts.min(MAX_ATTEMPTS)));
    }
    errors
}

pub fn check_retake(request: &CreateRetakeRequest, max_attempts: i32) -> ValidationErrors {
    check_attempt(request.attempt, max_attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn event(number: i32, count: i32) -> EventRequest {
        EventRequest {
            date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            number,
            count,
            course_id: 1,
            teacher_id: 2,
            cabinet_id: 3,
        }
    }

    fn user(email: &str) -> UserRequest {
        UserRequest {
            name: "Anna".to_string(),
            surname: "Smirnova".to_string(),
            lastname: "Olegovna".to_string(),
            login: "asmirnova".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: None,
            department_id: None,
            specialization_id: None,
        }
    }

    #[test]
    fn test_specialization_code_format() {
        let ok = SpecializationRequest { name: "Software Engineering".into(), code: "09.03.04".into(), institute_id: None };
        assert!(check_specialization(&ok).is_empty());

        let short = SpecializationRequest { code: "09.03.4".into(), ..ok.clone() };
        let errors = check_specialization(&short);
        assert_eq!(errors.errors.len(), 2);

        let letters = SpecializationRequest { code: "0a.03.04".into(), ..ok.clone() };
        assert!(check_specialization(&letters).has_field("code"));

        let empty = SpecializationRequest { code: String::new(), ..ok };
        assert_eq!(check_specialization(&empty).errors.len(), 1);
    }

    #[test]
    fn test_course_requires_links_and_names() {
        let request = CourseRequest {
            name: " ".into(),
            number: Some(1),
            semester: Some(2),
            kind: "exam".into(),
            institute_ids: vec![],
            specialization_ids: vec![1],
        };
        let errors = check_course(&request);
        assert!(errors.has_field("name"));
        assert!(errors.has_field("institute_ids"));
        assert!(!errors.has_field("specialization_ids"));
        assert!(!errors.has_field("type"));
    }

    #[test]
    fn test_event_bounds() {
        assert!(check_event(&event(1, 0)).is_empty());
        assert!(check_event(&event(6, 30)).is_empty());
        assert!(check_event(&event(0, 10)).has_field("number"));
        assert!(check_event(&event(7, 10)).has_field("number"));
        assert!(check_event(&event(3, -1)).has_field("count"));
        assert!(check_event(&event(3, 31)).has_field("count"));
    }

    #[test]
    fn test_user_email_format() {
        assert!(check_user(&user("anna@example.edu")).is_empty());
        assert!(check_user(&user("anna.example.edu")).has_field("email"));
        assert!(check_user(&user("")).has_field("email"));
    }

    #[test]
    fn test_attempt_bounded_by_config_and_schema() {
        assert!(check_attempt(3, 5).is_empty());
        assert!(check_attempt(4, 3).has_field("attempt"));
        assert!(check_attempt(6, 10).has_field("attempt"));
        assert!(check_attempt(0, 5).has_field("attempt"));
    }

    proptest! {
        #[test]
        fn prop_cabinet_number_range(number in -2000i32..2000) {
            let errors = check_cabinet(&CabinetRequest { number });
            prop_assert_eq!(errors.is_empty(), (1..=MAX_CABINET_NUMBER).contains(&number));
        }

        #[test]
        fn prop_dotted_digit_codes_are_accepted(a in 0u8..100, b in 0u8..100, c in 0u8..100) {
            let code = format!("{:02}.{:02}.{:02}", a, b, c);
            let request = SpecializationRequest { name: "Physics".into(), code, institute_id: None };
            prop_assert!(check_specialization(&request).is_empty());
        }

        #[test]
        fn prop_codes_without_dots_are_rejected(code in "[0-9]{8}") {
            let request = SpecializationRequest { name: "Physics".into(), code, institute_id: None };
            prop_assert!(check_specialization(&request).has_field("code"));
        }
    }
}

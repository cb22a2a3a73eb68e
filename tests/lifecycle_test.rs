//! Retake lifecycle integration tests
//!
//! Registration, assignment, event sign-up and grading against a real
//! PostgreSQL database.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use RetakeManager::models::{
    AttendanceMark, CheckRetakesRequest, RetakeAssignment, RetakeOutcome, Role, SignEventRequest,
    NewPastRetake, PastRetakeResult, UpdateRetakeRequest,
};
use RetakeManager::RetakeError;

macro_rules! context {
    () => {
        match TestContext::new().await {
            Some(ctx) => ctx,
            None => return,
        }
    };
}

#[tokio::test]
#[serial]
async fn test_registering_student_marks_untreated() {
    let ctx = context!();
    let catalog = ctx.catalog().await;

    let student = ctx.student(&catalog).await;
    assert_eq!(student.role, Role::Student);
    assert!(ctx.services.untreated.find_by_user(student.id).await.unwrap().is_some());

    // The teacher from the catalog got no marker
    assert!(ctx.services.untreated.find_by_user(catalog.teacher.id).await.unwrap().is_none());

    let details = ctx.services.untreated.find_all().await.unwrap();
    assert_eq!(details.len(), 1);
    let names: Vec<&str> = details[0].courses.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"Algebra"));
    assert!(names.contains(&"Physics"));
}

#[tokio::test]
#[serial]
async fn test_password_is_stored_hashed() {
    let ctx = context!();
    let request = user_request(Role::Student);
    let profile = ctx.services.registration.register(&request).await.unwrap();

    let stored: (String,) = sqlx::query_as("SELECT password FROM app_user WHERE id = $1")
        .bind(profile.id)
        .fetch_one(&ctx.database.pool)
        .await
        .unwrap();
    assert_ne!(stored.0, request.password);
    assert!(bcrypt::verify(&request.password, &stored.0).unwrap());
}

#[tokio::test]
#[serial]
async fn test_admin_cannot_self_register() {
    let ctx = context!();
    let result = ctx.services.registration.register(&user_request(Role::Admin)).await;
    assert_matches!(result, Err(RetakeError::PermissionDenied(_)));
    assert_eq!(ctx.database.count_records("app_user").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_update_keeps_role_and_rehashes() {
    let ctx = context!();
    let catalog = ctx.catalog().await;

    let mut request = user_request(Role::Admin);
    request.password = "Changed456".to_string();
    let updated = ctx.services.registration.update(catalog.teacher.id, &request).await.unwrap();

    assert_eq!(updated.role, Role::Teacher);
    assert_eq!(updated.login, request.login);
}

#[tokio::test]
#[serial]
async fn test_assign_creates_retakes_with_default_attempts() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student(&catalog).await;
    let untreated = ctx.services.untreated.find_by_user(student.id).await.unwrap().unwrap();

    let assignment = RetakeAssignment { course_ids: vec![catalog.algebra.id, catalog.physics.id] };
    let retakes = ctx.services.retakes.assign(catalog.admin.id, untreated.id, &assignment).await.unwrap();

    assert_eq!(retakes.len(), 2);
    assert!(retakes.iter().all(|r| r.attempt == ctx.settings.retakes.default_attempts));
    assert!(retakes.iter().all(|r| r.user_id == student.id));
    assert!(ctx.services.untreated.find_by_user(student.id).await.unwrap().is_none());

    let info = ctx.services.retakes.retakes_info(student.id).await.unwrap();
    assert!(!info.untreated);
    assert_eq!(info.retakes.len(), 2);

    // The marker is gone, so a second assignment has nothing to work on
    let again = ctx.services.retakes.assign(catalog.admin.id, untreated.id, &assignment).await;
    assert_matches!(again, Err(RetakeError::NotFound { .. }));
}

#[tokio::test]
#[serial]
async fn test_assign_rejects_bad_course_lists() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student(&catalog).await;
    let untreated = ctx.services.untreated.find_by_user(student.id).await.unwrap().unwrap();

    for course_ids in [vec![], vec![catalog.algebra.id, catalog.algebra.id], vec![9999]] {
        let result = ctx
            .services
            .retakes
            .assign(catalog.admin.id, untreated.id, &RetakeAssignment { course_ids })
            .await;
        assert_matches!(result, Err(RetakeError::Validation(errors)) if errors.has_field("course_ids"));
    }

    // Nothing was applied
    assert!(ctx.services.untreated.find_by_user(student.id).await.unwrap().is_some());
    assert_eq!(ctx.database.count_records("retake").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_sign_event_takes_a_seat_once() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student_with_retakes(&catalog, vec![catalog.algebra.id]).await;
    let event = ctx
        .services
        .events
        .create(&event_request(catalog.algebra.id, catalog.teacher.id, catalog.cabinet_id, 1, 2))
        .await
        .unwrap();

    let request = SignEventRequest { user_id: student.id, event_id: event.id };
    let signed = ctx.services.registration.sign_event(&request).await.unwrap();
    assert_eq!(signed.count, 1);

    let duplicate = ctx.services.registration.sign_event(&request).await;
    assert_matches!(duplicate, Err(RetakeError::Conflict(_)));
    assert_eq!(ctx.services.events.find_by_id(event.id).await.unwrap().count, 1);

    let events = ctx.services.registration.find_student_events(student.id).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(
        ctx.services.registration.registered_course_ids(student.id).await.unwrap(),
        vec![catalog.algebra.id]
    );
}

#[tokio::test]
#[serial]
async fn test_full_event_rejects_sign_up() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let first = ctx.student_with_retakes(&catalog, vec![catalog.algebra.id]).await;
    let second = ctx.student_with_retakes(&catalog, vec![catalog.algebra.id]).await;
    let event = ctx
        .services
        .events
        .create(&event_request(catalog.algebra.id, catalog.teacher.id, catalog.cabinet_id, 2, 1))
        .await
        .unwrap();

    ctx.services
        .registration
        .sign_event(&SignEventRequest { user_id: first.id, event_id: event.id })
        .await
        .unwrap();
    let full = ctx
        .services
        .registration
        .sign_event(&SignEventRequest { user_id: second.id, event_id: event.id })
        .await;

    assert_matches!(full, Err(RetakeError::Conflict(_)));
    assert_eq!(ctx.services.events.find_by_id(event.id).await.unwrap().count, 0);
    assert_eq!(ctx.services.events.event_students(event.id).await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_sign_event_requires_student_with_retake() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student_with_retakes(&catalog, vec![catalog.physics.id]).await;
    let event = ctx
        .services
        .events
        .create(&event_request(catalog.algebra.id, catalog.teacher.id, catalog.cabinet_id, 3, 5))
        .await
        .unwrap();

    let no_retake = ctx
        .services
        .registration
        .sign_event(&SignEventRequest { user_id: student.id, event_id: event.id })
        .await;
    assert_matches!(no_retake, Err(RetakeError::RetakeNotFound { .. }));

    let teacher = ctx
        .services
        .registration
        .sign_event(&SignEventRequest { user_id: catalog.teacher.id, event_id: event.id })
        .await;
    assert_matches!(teacher, Err(RetakeError::InvalidInput(_)));

    let missing = ctx
        .services
        .registration
        .sign_event(&SignEventRequest { user_id: student.id, event_id: 9999 })
        .await;
    assert_matches!(missing, Err(RetakeError::EventNotFound { event_id: 9999 }));
}

#[tokio::test]
#[serial]
async fn test_submit_retakes_passes_fails_and_expels() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let course_id = catalog.algebra.id;
    let passing = ctx.student_with_retakes(&catalog, vec![course_id]).await;
    let failing = ctx.student_with_retakes(&catalog, vec![course_id]).await;
    let last_try = ctx.student_with_retakes(&catalog, vec![course_id]).await;

    let last_retake = ctx.services.retakes.find_by_user_and_course(last_try.id, course_id).await.unwrap();
    ctx.services
        .retakes
        .update(last_retake.id, last_try.id, &UpdateRetakeRequest { attempt: 1 })
        .await
        .unwrap();

    let event = ctx
        .services
        .events
        .create(&event_request(course_id, catalog.teacher.id, catalog.cabinet_id, 4, 10))
        .await
        .unwrap();
    for student in [&passing, &failing, &last_try] {
        ctx.services
            .registration
            .sign_event(&SignEventRequest { user_id: student.id, event_id: event.id })
            .await
            .unwrap();
    }

    let request = CheckRetakesRequest {
        event_id: event.id,
        marks: vec![
            AttendanceMark { user_id: passing.id, outcome: RetakeOutcome::Pass },
            AttendanceMark { user_id: failing.id, outcome: RetakeOutcome::Fail },
            AttendanceMark { user_id: last_try.id, outcome: RetakeOutcome::Fail },
        ],
    };
    let summary = ctx.services.events.submit_retakes(&request).await.unwrap();

    assert_eq!(summary.passed, vec![passing.id]);
    assert_eq!(summary.failed, vec![failing.id]);
    assert_eq!(summary.expelled, vec![last_try.id]);

    // Pass clears the retake and records history
    assert_matches!(
        ctx.services.retakes.find_by_user_and_course(passing.id, course_id).await,
        Err(RetakeError::RetakeNotFound { .. })
    );
    let history = ctx.services.past_retakes.find_all_by_user(passing.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, "passed");
    assert_eq!(history[0].subject, "Algebra");
    assert_eq!(history[0].date, retake_date());

    // Fail costs an attempt
    let remaining = ctx.services.retakes.find_by_user_and_course(failing.id, course_id).await.unwrap();
    assert_eq!(remaining.attempt, ctx.settings.retakes.default_attempts - 1);
    let history = ctx.services.past_retakes.find_all_by_user(failing.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, "failed");

    // Failing the last attempt expels without history
    assert_matches!(
        ctx.services.registration.find_by_id(last_try.id).await,
        Err(RetakeError::UserNotFound { .. })
    );
    assert_eq!(ctx.database.count_records("past_retake").await.unwrap(), 2);

    // The event is closed
    assert_matches!(
        ctx.services.events.find_by_id(event.id).await,
        Err(RetakeError::EventNotFound { .. })
    );
}

#[tokio::test]
#[serial]
async fn test_submit_retakes_rejects_strangers_atomically() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let course_id = catalog.algebra.id;
    let signed = ctx.student_with_retakes(&catalog, vec![course_id]).await;
    let stranger = ctx.student_with_retakes(&catalog, vec![course_id]).await;
    let event = ctx
        .services
        .events
        .create(&event_request(course_id, catalog.teacher.id, catalog.cabinet_id, 5, 10))
        .await
        .unwrap();
    ctx.services
        .registration
        .sign_event(&SignEventRequest { user_id: signed.id, event_id: event.id })
        .await
        .unwrap();

    let request = CheckRetakesRequest {
        event_id: event.id,
        marks: vec![
            AttendanceMark { user_id: signed.id, outcome: RetakeOutcome::Pass },
            AttendanceMark { user_id: stranger.id, outcome: RetakeOutcome::Pass },
        ],
    };
    let result = ctx.services.events.submit_retakes(&request).await;
    assert_matches!(result, Err(RetakeError::InvalidInput(_)));

    // Nothing was applied
    assert!(ctx.services.events.find_by_id(event.id).await.is_ok());
    assert!(ctx.services.retakes.find_by_user_and_course(signed.id, course_id).await.is_ok());
    assert_eq!(ctx.database.count_records("past_retake").await.unwrap(), 0);

    let missing = ctx
        .services
        .events
        .submit_retakes(&CheckRetakesRequest { event_id: 9999, marks: vec![] })
        .await;
    assert_matches!(missing, Err(RetakeError::EventNotFound { event_id: 9999 }));
}

#[tokio::test]
#[serial]
async fn test_deleting_student_removes_untreated_marker() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student(&catalog).await;

    ctx.services.registration.delete(student.id).await.unwrap();

    assert_eq!(ctx.database.count_records("untreated_student").await.unwrap(), 0);
    assert_matches!(
        ctx.services.registration.delete(student.id).await,
        Err(RetakeError::UserNotFound { .. })
    );
}

#[tokio::test]
#[serial]
async fn test_available_events_are_open_events_of_the_course() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student_with_retakes(&catalog, vec![catalog.algebra.id]).await;
    let retake = ctx.services.retakes.find_by_user_and_course(student.id, catalog.algebra.id).await.unwrap();

    let open = ctx
        .services
        .events
        .create(&event_request(catalog.algebra.id, catalog.teacher.id, catalog.cabinet_id, 1, 3))
        .await
        .unwrap();
    ctx.services
        .events
        .create(&event_request(catalog.algebra.id, catalog.teacher.id, catalog.cabinet_id, 2, 0))
        .await
        .unwrap();
    ctx.services
        .events
        .create(&event_request(catalog.physics.id, catalog.teacher.id, catalog.cabinet_id, 3, 3))
        .await
        .unwrap();

    let available = ctx.services.retakes.available_events(retake.id, student.id).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, open.id);
    assert_eq!(available[0].course_name, "Algebra");

    let teacher_events = ctx.services.registration.find_teacher_events(catalog.teacher.id).await.unwrap();
    assert_eq!(teacher_events.len(), 3);
}

#[tokio::test]
#[serial]
async fn test_past_retake_history_is_newest_first() {
    let ctx = context!();
    let catalog = ctx.catalog().await;
    let student = ctx.student(&catalog).await;

    let older = NewPastRetake {
        user_id: student.id,
        date: retake_date() - chrono::Duration::days(30),
        result: PastRetakeResult::Failed,
        subject: "Algebra".to_string(),
    };
    let newer = NewPastRetake {
        date: retake_date(),
        result: PastRetakeResult::Passed,
        ..older.clone()
    };
    let first = ctx.services.past_retakes.create(&older).await.unwrap();
    ctx.services.past_retakes.create(&newer).await.unwrap();

    let history = ctx.services.past_retakes.find_all_by_user(student.id).await.unwrap();
    let results: Vec<&str> = history.iter().map(|r| r.result.as_str()).collect();
    assert_eq!(results, vec!["passed", "failed"]);

    ctx.services.past_retakes.delete(first.id).await.unwrap();
    assert_eq!(ctx.services.past_retakes.find_all_by_user(student.id).await.unwrap().len(), 1);
    assert_matches!(
        ctx.services.past_retakes.delete(first.id).await,
        Err(RetakeError::NotFound { entity: "Past retake", .. })
    );

    // Teachers have no retake history
    assert_matches!(
        ctx.services.past_retakes.find_all_by_user(catalog.teacher.id).await,
        Err(RetakeError::InvalidInput(_))
    );
}

//! Event service implementation
//!
//! Scheduling of retake sessions and grading of a held session. Grading is
//! the end of an event's life: outcomes go into the students' history and
//! the event itself is removed.

use std::collections::HashSet;
use tracing::{debug, info};
use crate::database::DatabaseService;
use crate::models::{
    CheckRetakesRequest, CheckRetakesSummary, Event, EventRequest, EventView, NewPastRetake,
    PastRetakeResult, RetakeOutcome, Role, UserProfile,
};
use crate::utils::errors::{RetakeError, Result};
use crate::utils::logging::{log_expulsion, log_retake_outcome};
use crate::validation::{rules, uniqueness, ValidationErrors};

#[derive(Clone, Debug)]
pub struct EventService {
    db: DatabaseService,
}

impl EventService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<EventView>> {
        self.db.events.find_all_views().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<EventView> {
        self.db
            .events
            .find_view_by_id(id)
            .await?
            .ok_or(RetakeError::EventNotFound { event_id: id })
    }

    pub async fn create(&self, request: &EventRequest) -> Result<EventView> {
        rules::check_event(request).into_result()?;
        self.check_references(request).await?;
        uniqueness::check_event(&self.db, request, None).await?.into_result()?;

        let event = self.db.events.create(request).await?;
        info!(
            event_id = event.id,
            course_id = event.course_id,
            date = %event.date,
            number = event.number,
            "Retake event scheduled"
        );
        self.find_by_id(event.id).await
    }

    pub async fn update(&self, id: i32, request: &EventRequest) -> Result<EventView> {
        rules::check_event(request).into_result()?;
        self.find_by_id(id).await?;
        self.check_references(request).await?;
        uniqueness::check_event(&self.db, request, Some(id)).await?.into_result()?;

        self.db
            .events
            .update(id, request)
            .await?
            .ok_or(RetakeError::EventNotFound { event_id: id })?;
        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.events.delete(id).await? {
            return Err(RetakeError::EventNotFound { event_id: id });
        }
        info!(event_id = id, "Retake event deleted");
        Ok(())
    }

    /// Students signed up for an event
    pub async fn event_students(&self, id: i32) -> Result<Vec<UserProfile>> {
        self.find_by_id(id).await?;
        let students = self.db.events.students(id).await?;
        Ok(students.into_iter().map(UserProfile::from).collect())
    }

    /// Record the results of a held event and close it
    ///
    /// A pass clears the student's retake. A fail costs one attempt, and
    /// failing the last one expels the student. Every mark must belong to a
    /// student signed up for the event. All changes commit together.
    pub async fn submit_retakes(&self, request: &CheckRetakesRequest) -> Result<CheckRetakesSummary> {
        let event_id = request.event_id;
        let mut tx = self.db.begin().await?;

        let event: Event = self
            .db
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(RetakeError::EventNotFound { event_id })?;

        let subject = self
            .db
            .courses
            .find_by_id(event.course_id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Course", event.course_id))?
            .name;

        let signed_up: HashSet<i32> = self
            .db
            .events
            .student_ids_in(&mut tx, event_id)
            .await?
            .into_iter()
            .collect();
        check_marks(request, &signed_up)?;

        let mut summary = CheckRetakesSummary::default();
        let mut history = Vec::with_capacity(request.marks.len());
        let mut attempts_left_by_user = Vec::new();

        for mark in &request.marks {
            let user_id = mark.user_id;
            let retake = self
                .db
                .retakes
                .find_by_user_and_course_in(&mut tx, user_id, event.course_id)
                .await?
                .ok_or(RetakeError::RetakeNotFound { user_id, course_id: event.course_id })?;

            match mark.outcome {
                RetakeOutcome::Pass => {
                    self.db.events.remove_student_in(&mut tx, event_id, user_id).await?;
                    self.db.retakes.delete_in(&mut tx, retake.id).await?;
                    history.push(NewPastRetake {
                        user_id,
                        date: event.date,
                        result: PastRetakeResult::Passed,
                        subject: subject.clone(),
                    });
                    summary.passed.push(user_id);
                }
                RetakeOutcome::Fail => {
                    let attempts_left = retake.attempt - 1;
                    if attempts_left <= 0 {
                        // Expelled students leave no history behind
                        self.db.users.delete_in(&mut tx, user_id).await?;
                        summary.expelled.push(user_id);
                    } else {
                        self.db.retakes.update_attempt_in(&mut tx, retake.id, attempts_left).await?;
                        attempts_left_by_user.push((user_id, attempts_left));
                        history.push(NewPastRetake {
                            user_id,
                            date: event.date,
                            result: PastRetakeResult::Failed,
                            subject: subject.clone(),
                        });
                        summary.failed.push(user_id);
                    }
                }
            }
        }

        for record in &history {
            self.db.past_retakes.create_in(&mut tx, record).await?;
        }
        self.db.events.delete_in(&mut tx, event_id).await?;

        tx.commit().await?;

        for record in &history {
            let attempts_left = attempts_left_by_user
                .iter()
                .find(|(user_id, _)| *user_id == record.user_id)
                .map(|(_, left)| *left);
            log_retake_outcome(event_id, record.user_id, &record.subject, record.result.as_str(), attempts_left);
        }
        for user_id in &summary.expelled {
            log_expulsion(*user_id, &subject);
        }
        info!(
            event_id = event_id,
            passed = summary.passed.len(),
            failed = summary.failed.len(),
            expelled = summary.expelled.len(),
            "Retake event graded and closed"
        );

        Ok(summary)
    }

    /// Course, teacher and cabinet must exist; the teacher must teach
    async fn check_references(&self, request: &EventRequest) -> Result<()> {
        if self.db.courses.find_by_id(request.course_id).await?.is_none() {
            return Err(RetakeError::not_found("Course", request.course_id));
        }
        if self.db.cabinets.find_by_id(request.cabinet_id).await?.is_none() {
            return Err(RetakeError::not_found("Cabinet", request.cabinet_id));
        }

        let teacher = self
            .db
            .users
            .find_by_id(request.teacher_id)
            .await?
            .ok_or(RetakeError::UserNotFound { user_id: request.teacher_id })?;
        if teacher.role() != Role::Teacher {
            debug!(user_id = teacher.id, role = %teacher.role(), "Event teacher rejected");
            let mut errors = ValidationErrors::new();
            errors.reject("teacher_id", "The selected user is not a teacher");
            return Err(errors.into());
        }

        Ok(())
    }
}

/// Marks must name distinct students who are signed up for the event
fn check_marks(request: &CheckRetakesRequest, signed_up: &HashSet<i32>) -> Result<()> {
    let mut seen = HashSet::new();
    for mark in &request.marks {
        if !seen.insert(mark.user_id) {
            return Err(RetakeError::InvalidInput(format!(
                "Student {} is marked more than once",
                mark.user_id
            )));
        }
        if !signed_up.contains(&mark.user_id) {
            return Err(RetakeError::InvalidInput(format!(
                "Student {} is not signed up for event {}",
                mark.user_id, request.event_id
            )));
        }
    }
    Ok(())
}

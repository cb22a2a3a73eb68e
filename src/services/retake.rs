//! Retake service implementation
//!
//! Outstanding retakes of students, including their initial assignment to a
//! freshly registered (untreated) student.

use std::collections::HashSet;
use tracing::info;
use crate::config::Settings;
use crate::database::DatabaseService;
use crate::models::{
    CreateRetakeRequest, EventView, Retake, RetakeAssignment, RetakeView, RetakesInfo, Role,
    UpdateRetakeRequest, UserProfile,
};
use crate::utils::errors::{RetakeError, Result};
use crate::utils::logging::log_admin_action;
use crate::validation::{rules, uniqueness, ValidationErrors};

#[derive(Clone, Debug)]
pub struct RetakeService {
    db: DatabaseService,
    settings: Settings,
}

impl RetakeService {
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        Self { db, settings }
    }

    /// Give an untreated student one retake per course and mark them treated
    pub async fn assign(&self, admin_id: i32, untreated_id: i32, assignment: &RetakeAssignment) -> Result<Vec<Retake>> {
        let untreated = self
            .db
            .untreated
            .find_by_id(untreated_id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Untreated student", untreated_id))?;
        let user_id = untreated.user_id;

        self.check_assignment(assignment).await?;

        let attempts = self.settings.retakes.default_attempts;
        let mut tx = self.db.begin().await?;
        let mut retakes = Vec::with_capacity(assignment.course_ids.len());

        for course_id in &assignment.course_ids {
            if self
                .db
                .retakes
                .find_by_user_and_course_in(&mut tx, user_id, *course_id)
                .await?
                .is_some()
            {
                return Err(RetakeError::Conflict(format!(
                    "Student {} already has a retake for course {}",
                    user_id, course_id
                )));
            }
            retakes.push(self.db.retakes.create_in(&mut tx, user_id, *course_id, attempts).await?);
        }
        self.db.untreated.delete_in(&mut tx, untreated_id).await?;

        tx.commit().await?;

        log_admin_action(
            admin_id,
            "assign_retakes",
            Some(&format!("user:{}", user_id)),
            Some(&format!("{} courses, {} attempts each", retakes.len(), attempts)),
        );
        Ok(retakes)
    }

    pub async fn find_all(&self) -> Result<Vec<RetakeView>> {
        self.db.retakes.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Retake> {
        self.db
            .retakes
            .find_by_id(id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Retake", id))
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<RetakeView>> {
        self.require_student(user_id).await?;
        self.db.retakes.find_by_user(user_id).await
    }

    pub async fn find_by_user_and_course(&self, user_id: i32, course_id: i32) -> Result<Retake> {
        self.db
            .retakes
            .find_by_user_and_course(user_id, course_id)
            .await?
            .ok_or(RetakeError::RetakeNotFound { user_id, course_id })
    }

    /// Profile, untreated flag, retakes and signed-up courses of a user
    pub async fn retakes_info(&self, user_id: i32) -> Result<RetakesInfo> {
        let user = self
            .db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RetakeError::UserNotFound { user_id })?;

        let untreated = self.db.untreated.find_by_user(user_id).await?.is_some();
        let retakes = self.db.retakes.find_by_user(user_id).await?;
        let registered_course_ids = self.db.events.registered_course_ids(user_id).await?;

        Ok(RetakesInfo {
            user: UserProfile::from(user),
            untreated,
            retakes,
            registered_course_ids,
        })
    }

    pub async fn create(&self, user_id: i32, request: &CreateRetakeRequest) -> Result<Retake> {
        rules::check_retake(request, self.settings.retakes.max_attempts).into_result()?;
        self.require_student(user_id).await?;
        if self.db.courses.find_by_id(request.course_id).await?.is_none() {
            return Err(RetakeError::not_found("Course", request.course_id));
        }
        uniqueness::check_retake(&self.db, user_id, request.course_id, None).await?.into_result()?;

        let retake = self.db.retakes.create(user_id, request.course_id, request.attempt).await?;
        info!(retake_id = retake.id, user_id = user_id, course_id = retake.course_id, "Retake created");
        Ok(retake)
    }

    pub async fn update(&self, retake_id: i32, user_id: i32, request: &UpdateRetakeRequest) -> Result<Retake> {
        rules::check_attempt(request.attempt, self.settings.retakes.max_attempts).into_result()?;
        self.owned(retake_id, user_id).await?;

        self.db
            .retakes
            .update_attempt(retake_id, request.attempt)
            .await?
            .ok_or_else(|| RetakeError::not_found("Retake", retake_id))
    }

    pub async fn delete(&self, retake_id: i32, user_id: i32) -> Result<()> {
        self.owned(retake_id, user_id).await?;
        self.db.retakes.delete(retake_id).await?;
        info!(retake_id = retake_id, user_id = user_id, "Retake deleted");
        Ok(())
    }

    /// Events of the retake's course that still have free seats
    pub async fn available_events(&self, retake_id: i32, user_id: i32) -> Result<Vec<EventView>> {
        self.require_student(user_id).await?;
        let retake = self.owned(retake_id, user_id).await?;
        self.db.events.find_open_by_course(retake.course_id).await
    }

    /// The retake, provided it belongs to the given user
    async fn owned(&self, retake_id: i32, user_id: i32) -> Result<Retake> {
        let retake = self.find_by_id(retake_id).await?;
        if retake.user_id != user_id {
            return Err(RetakeError::not_found("Retake", retake_id));
        }
        Ok(retake)
    }

    async fn require_student(&self, user_id: i32) -> Result<()> {
        let user = self
            .db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RetakeError::UserNotFound { user_id })?;
        if user.role() != Role::Student {
            return Err(RetakeError::InvalidInput(format!("User {} is not a student", user_id)));
        }
        Ok(())
    }

    async fn check_assignment(&self, assignment: &RetakeAssignment) -> Result<()> {
        let mut errors = ValidationErrors::new();
        let distinct: HashSet<i32> = assignment.course_ids.iter().copied().collect();

        if assignment.course_ids.is_empty() {
            errors.reject("course_ids", "Select at least one course");
        } else if distinct.len() != assignment.course_ids.len() {
            errors.reject("course_ids", "A course is listed more than once");
        } else if self.db.courses.count_existing(&assignment.course_ids).await? != distinct.len() as i64 {
            errors.reject("course_ids", "Unknown course selected");
        }

        Ok(errors.into_result()?)
    }
}

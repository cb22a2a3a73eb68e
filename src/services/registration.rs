//! Registration service implementation
//!
//! User accounts: sign-up, profile management and the student side of the
//! retake lifecycle (signing up for events).

use tracing::{debug, info};
use crate::config::Settings;
use crate::database::DatabaseService;
use crate::models::{EventView, NewUser, Role, SignEventRequest, User, UserProfile, UserRequest};
use crate::utils::errors::{RetakeError, Result};
use crate::utils::helpers::hash_password;
use crate::utils::logging::log_event_signup;
use crate::validation::{rules, uniqueness, ValidationErrors};

#[derive(Clone, Debug)]
pub struct RegistrationService {
    db: DatabaseService,
    settings: Settings,
}

impl RegistrationService {
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        Self { db, settings }
    }

    /// Public sign-up; students start out untreated
    pub async fn register(&self, request: &UserRequest) -> Result<UserProfile> {
        let role = request.role.unwrap_or(Role::Student);
        if role == Role::Admin {
            return Err(RetakeError::PermissionDenied(
                "Administrator accounts cannot be self-registered".to_string(),
            ));
        }
        self.create_user(request, role).await
    }

    pub async fn register_admin(&self, request: &UserRequest) -> Result<UserProfile> {
        self.create_user(request, Role::Admin).await
    }

    async fn create_user(&self, request: &UserRequest, role: Role) -> Result<UserProfile> {
        rules::check_user(request).into_result()?;
        self.check_links(request).await?;
        uniqueness::check_user(&self.db, request, None).await?.into_result()?;

        let new_user = self.new_user(request, role)?;

        let mut tx = self.db.begin().await?;
        let user = self.db.users.create_in(&mut tx, &new_user).await?;
        if role == Role::Student {
            self.db.untreated.create_in(&mut tx, user.id).await?;
        }
        tx.commit().await?;

        info!(user_id = user.id, login = %user.login, role = %role, "User registered");
        Ok(UserProfile::from(user))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<UserProfile> {
        Ok(UserProfile::from(self.load(id).await?))
    }

    pub async fn find_all(&self) -> Result<Vec<UserProfile>> {
        let users = self.db.users.find_all().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    pub async fn find_teachers(&self) -> Result<Vec<UserProfile>> {
        let users = self.db.users.find_all_by_role(Role::Teacher).await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    /// Replace the profile; the password is re-hashed and the role kept
    pub async fn update(&self, id: i32, request: &UserRequest) -> Result<UserProfile> {
        rules::check_user(request).into_result()?;
        let existing = self.load(id).await?;
        self.check_links(request).await?;
        uniqueness::check_user(&self.db, request, Some(id)).await?.into_result()?;

        let new_user = self.new_user(request, existing.role())?;
        let user = self
            .db
            .users
            .update(id, &new_user)
            .await?
            .ok_or(RetakeError::UserNotFound { user_id: id })?;

        info!(user_id = id, "User profile updated");
        Ok(UserProfile::from(user))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let mut tx = self.db.begin().await?;
        self.db.untreated.delete_by_user_in(&mut tx, id).await?;
        if !self.db.users.delete_in(&mut tx, id).await? {
            return Err(RetakeError::UserNotFound { user_id: id });
        }
        tx.commit().await?;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Events a teacher runs
    pub async fn find_teacher_events(&self, teacher_id: i32) -> Result<Vec<EventView>> {
        self.require_role(teacher_id, Role::Teacher).await?;
        self.db.events.find_by_teacher(teacher_id).await
    }

    /// Events a student is signed up for
    pub async fn find_student_events(&self, user_id: i32) -> Result<Vec<EventView>> {
        self.require_role(user_id, Role::Student).await?;
        self.db.events.find_by_student(user_id).await
    }

    /// Courses for which the student already holds an event sign-up
    pub async fn registered_course_ids(&self, user_id: i32) -> Result<Vec<i32>> {
        self.load(user_id).await?;
        self.db.events.registered_course_ids(user_id).await
    }

    /// Sign a student up for a retake event, taking one free seat
    pub async fn sign_event(&self, request: &SignEventRequest) -> Result<EventView> {
        let SignEventRequest { user_id, event_id } = *request;
        self.require_role(user_id, Role::Student).await?;

        let mut tx = self.db.begin().await?;

        let event = self
            .db
            .events
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(RetakeError::EventNotFound { event_id })?;

        if self
            .db
            .retakes
            .find_by_user_and_course_in(&mut tx, user_id, event.course_id)
            .await?
            .is_none()
        {
            return Err(RetakeError::RetakeNotFound { user_id, course_id: event.course_id });
        }

        if self.db.events.is_registered_in(&mut tx, event_id, user_id).await? {
            return Err(RetakeError::Conflict(format!(
                "Student {} is already signed up for event {}",
                user_id, event_id
            )));
        }

        let seats_left = self
            .db
            .events
            .take_seat_in(&mut tx, event_id)
            .await?
            .ok_or_else(|| RetakeError::Conflict(format!("Event {} has no free seats", event_id)))?;
        self.db.events.add_student_in(&mut tx, event_id, user_id).await?;

        tx.commit().await?;

        log_event_signup(event_id, user_id, seats_left);
        self.db
            .events
            .find_view_by_id(event_id)
            .await?
            .ok_or(RetakeError::EventNotFound { event_id })
    }

    async fn check_links(&self, request: &UserRequest) -> Result<()> {
        let mut errors = ValidationErrors::new();

        if let Some(id) = request.department_id {
            if self.db.departments.find_by_id(id).await?.is_none() {
                errors.reject("department_id", &format!("Unknown department {}", id));
            }
        }
        if let Some(id) = request.specialization_id {
            if self.db.specializations.find_by_id(id).await?.is_none() {
                errors.reject("specialization_id", &format!("Unknown specialization {}", id));
            }
        }

        Ok(errors.into_result()?)
    }

    async fn load(&self, id: i32) -> Result<User> {
        self.db
            .users
            .find_by_id(id)
            .await?
            .ok_or(RetakeError::UserNotFound { user_id: id })
    }

    async fn require_role(&self, id: i32, role: Role) -> Result<User> {
        let user = self.load(id).await?;
        if user.role() != role {
            debug!(user_id = id, role = %user.role(), expected = %role, "Role mismatch");
            return Err(RetakeError::InvalidInput(format!("User {} does not have {}", id, role)));
        }
        Ok(user)
    }

    fn new_user(&self, request: &UserRequest, role: Role) -> Result<NewUser> {
        Ok(NewUser {
            name: request.name.clone(),
            surname: request.surname.clone(),
            lastname: request.lastname.clone(),
            login: request.login.clone(),
            email: request.email.clone(),
            password: hash_password(&request.password, self.settings.security.bcrypt_cost)?,
            role,
            department_id: request.department_id,
            specialization_id: request.specialization_id,
        })
    }
}

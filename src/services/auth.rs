//! Authorization service implementation
//!
//! Resolves the acting user of a request and decides which users may touch
//! which resources. Admins may do everything; other users only act on
//! themselves, and teachers additionally on the events they run.

use tracing::{debug, warn};
use crate::database::DatabaseService;
use crate::models::{Event, Role, User};
use crate::utils::errors::{RetakeError, Result};

/// The signed-in user performing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub role: Role,
}

impl Actor {
    pub fn new(id: i32, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role())
    }
}

/// Authorization service for role-based access control
#[derive(Clone, Debug)]
pub struct AccessService {
    db: DatabaseService,
}

impl AccessService {
    /// Create a new AccessService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Turn a claimed user id into an actor; unknown users are not signed in
    pub async fn resolve(&self, user_id: i32) -> Result<Actor> {
        match self.db.users.find_by_id(user_id).await? {
            Some(user) => {
                debug!(user_id = user.id, role = %user.role(), "Actor resolved");
                Ok(Actor::from(&user))
            }
            None => {
                warn!(user_id = user_id, "Request claims unknown user");
                Err(RetakeError::Unauthorized)
            }
        }
    }

    pub fn require_admin(&self, actor: &Actor) -> Result<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            warn!(user_id = actor.id, "Unauthorized admin access attempt");
            Err(RetakeError::PermissionDenied("Admin privileges required".to_string()))
        }
    }

    pub fn require_admin_or_self(&self, actor: &Actor, user_id: i32) -> Result<()> {
        if actor.is_admin() || actor.id == user_id {
            Ok(())
        } else {
            warn!(user_id = actor.id, target = user_id, "Access to another user's data denied");
            Err(RetakeError::PermissionDenied("You may only access your own data".to_string()))
        }
    }

    /// Admins and the teacher running the event may see and grade it
    pub async fn require_event_teacher_or_admin(&self, actor: &Actor, event_id: i32) -> Result<Event> {
        let event = self
            .db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(RetakeError::EventNotFound { event_id })?;

        if actor.is_admin() || event.teacher_id == Some(actor.id) {
            Ok(event)
        } else {
            warn!(user_id = actor.id, event_id = event_id, "Event access denied");
            Err(RetakeError::PermissionDenied("Only the event's teacher may do this".to_string()))
        }
    }
}

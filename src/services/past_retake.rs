//! Past retake (history) service implementation

use crate::database::DatabaseService;
use crate::models::{NewPastRetake, PastRetake, Role};
use crate::utils::errors::{RetakeError, Result};

#[derive(Clone, Debug)]
pub struct PastRetakeService {
    db: DatabaseService,
}

impl PastRetakeService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Retake history of a student, newest first
    pub async fn find_all_by_user(&self, user_id: i32) -> Result<Vec<PastRetake>> {
        let user = self
            .db
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RetakeError::UserNotFound { user_id })?;
        if user.role() != Role::Student {
            return Err(RetakeError::InvalidInput(format!("User {} is not a student", user_id)));
        }
        self.db.past_retakes.find_all_by_user(user_id).await
    }

    pub async fn create(&self, record: &NewPastRetake) -> Result<PastRetake> {
        if self.db.users.find_by_id(record.user_id).await?.is_none() {
            return Err(RetakeError::UserNotFound { user_id: record.user_id });
        }
        self.db.past_retakes.create(record).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.past_retakes.delete(id).await? {
            return Err(RetakeError::not_found("Past retake", id));
        }
        Ok(())
    }
}

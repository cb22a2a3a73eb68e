//! Untreated student service implementation

use crate::database::DatabaseService;
use crate::models::{UntreatedStudent, UntreatedStudentDetails, UserProfile};
use crate::utils::errors::{RetakeError, Result};

#[derive(Clone, Debug)]
pub struct UntreatedStudentService {
    db: DatabaseService,
}

impl UntreatedStudentService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<UntreatedStudentDetails>> {
        let mut students = Vec::new();
        for untreated in self.db.untreated.find_all().await? {
            students.push(self.details(untreated).await?);
        }
        Ok(students)
    }

    /// The student along with the courses of their specialization
    pub async fn find_by_id(&self, id: i32) -> Result<UntreatedStudentDetails> {
        let untreated = self
            .db
            .untreated
            .find_by_id(id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Untreated student", id))?;
        self.details(untreated).await
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<UntreatedStudent>> {
        self.db.untreated.find_by_user(user_id).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.untreated.delete(id).await? {
            return Err(RetakeError::not_found("Untreated student", id));
        }
        Ok(())
    }

    async fn details(&self, untreated: UntreatedStudent) -> Result<UntreatedStudentDetails> {
        let user = self
            .db
            .users
            .find_by_id(untreated.user_id)
            .await?
            .ok_or(RetakeError::UserNotFound { user_id: untreated.user_id })?;

        let courses = match user.specialization_id {
            Some(specialization_id) => self.db.specializations.courses(specialization_id).await?,
            None => Vec::new(),
        };

        Ok(UntreatedStudentDetails {
            id: untreated.id,
            user: UserProfile::from(user),
            courses,
        })
    }
}

//! Institute service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{Institute, InstituteRequest};
use crate::utils::errors::{RetakeError, Result};
use crate::validation::{rules, uniqueness};

#[derive(Clone, Debug)]
pub struct InstituteService {
    db: DatabaseService,
}

impl InstituteService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Institute>> {
        self.db.institutes.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Institute> {
        self.db
            .institutes
            .find_by_id(id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Institute", id))
    }

    pub async fn create(&self, request: &InstituteRequest) -> Result<Institute> {
        rules::check_institute(request).into_result()?;
        uniqueness::check_institute(&self.db, request, None).await?.into_result()?;

        let institute = self.db.institutes.create(request).await?;
        info!(institute_id = institute.id, name = %institute.name, "Institute created");
        Ok(institute)
    }

    pub async fn update(&self, id: i32, request: &InstituteRequest) -> Result<Institute> {
        rules::check_institute(request).into_result()?;
        self.find_by_id(id).await?;
        uniqueness::check_institute(&self.db, request, Some(id)).await?.into_result()?;

        self.db
            .institutes
            .update(id, request)
            .await?
            .ok_or_else(|| RetakeError::not_found("Institute", id))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.institutes.delete(id).await? {
            return Err(RetakeError::not_found("Institute", id));
        }
        info!(institute_id = id, "Institute deleted");
        Ok(())
    }
}

//! Specialization service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{Course, Specialization, SpecializationRequest};
use crate::utils::errors::{RetakeError, Result};
use crate::validation::{rules, uniqueness};

#[derive(Clone, Debug)]
pub struct SpecializationService {
    db: DatabaseService,
}

impl SpecializationService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Specialization>> {
        self.db.specializations.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Specialization> {
        self.db
            .specializations
            .find_by_id(id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Specialization", id))
    }

    /// Courses taught on a specialization
    pub async fn courses(&self, id: i32) -> Result<Vec<Course>> {
        self.find_by_id(id).await?;
        self.db.specializations.courses(id).await
    }

    pub async fn create(&self, request: &SpecializationRequest) -> Result<Specialization> {
        rules::check_specialization(request).into_result()?;
        self.ensure_institute(request.institute_id).await?;
        uniqueness::check_specialization(&self.db, request, None).await?.into_result()?;

        let specialization = self.db.specializations.create(request).await?;
        info!(
            specialization_id = specialization.id,
            code = %specialization.code,
            "Specialization created"
        );
        Ok(specialization)
    }

    pub async fn update(&self, id: i32, request: &SpecializationRequest) -> Result<Specialization> {
        rules::check_specialization(request).into_result()?;
        self.find_by_id(id).await?;
        self.ensure_institute(request.institute_id).await?;
        uniqueness::check_specialization(&self.db, request, Some(id)).await?.into_result()?;

        self.db
            .specializations
            .update(id, request)
            .await?
            .ok_or_else(|| RetakeError::not_found("Specialization", id))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.specializations.delete(id).await? {
            return Err(RetakeError::not_found("Specialization", id));
        }
        info!(specialization_id = id, "Specialization deleted");
        Ok(())
    }

    async fn ensure_institute(&self, institute_id: Option<i32>) -> Result<()> {
        if let Some(id) = institute_id {
            if self.db.institutes.find_by_id(id).await?.is_none() {
                return Err(RetakeError::not_found("Institute", id));
            }
        }
        Ok(())
    }
}

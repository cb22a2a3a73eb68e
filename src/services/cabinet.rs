//! Cabinet service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{Cabinet, CabinetRequest};
use crate::utils::errors::{RetakeError, Result};
use crate::validation::{rules, uniqueness};

#[derive(Clone, Debug)]
pub struct CabinetService {
    db: DatabaseService,
}

impl CabinetService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Cabinet>> {
        self.db.cabinets.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Cabinet> {
        self.db
            .cabinets
            .find_by_id(id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Cabinet", id))
    }

    pub async fn create(&self, request: &CabinetRequest) -> Result<Cabinet> {
        rules::check_cabinet(request).into_result()?;
        uniqueness::check_cabinet(&self.db, request, None).await?.into_result()?;

        let cabinet = self.db.cabinets.create(request).await?;
        info!(cabinet_id = cabinet.id, number = cabinet.number, "Cabinet created");
        Ok(cabinet)
    }

    pub async fn update(&self, id: i32, request: &CabinetRequest) -> Result<Cabinet> {
        rules::check_cabinet(request).into_result()?;
        self.find_by_id(id).await?;
        uniqueness::check_cabinet(&self.db, request, Some(id)).await?.into_result()?;

        self.db
            .cabinets
            .update(id, request)
            .await?
            .ok_or_else(|| RetakeError::not_found("Cabinet", id))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.cabinets.delete(id).await? {
            return Err(RetakeError::not_found("Cabinet", id));
        }
        info!(cabinet_id = id, "Cabinet deleted");
        Ok(())
    }
}

//! Department service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{Department, DepartmentRequest};
use crate::utils::errors::{RetakeError, Result};
use crate::validation::{rules, uniqueness};

#[derive(Clone, Debug)]
pub struct DepartmentService {
    db: DatabaseService,
}

impl DepartmentService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Department>> {
        self.db.departments.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Department> {
        self.db
            .departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Department", id))
    }

    pub async fn create(&self, request: &DepartmentRequest) -> Result<Department> {
        rules::check_department(request).into_result()?;
        self.ensure_institute(request.institute_id).await?;
        uniqueness::check_department(&self.db, request, None).await?.into_result()?;

        let department = self.db.departments.create(request).await?;
        info!(department_id = department.id, name = %department.name, "Department created");
        Ok(department)
    }

    pub async fn update(&self, id: i32, request: &DepartmentRequest) -> Result<Department> {
        rules::check_department(request).into_result()?;
        self.find_by_id(id).await?;
        self.ensure_institute(request.institute_id).await?;
        uniqueness::check_department(&self.db, request, Some(id)).await?.into_result()?;

        self.db
            .departments
            .update(id, request)
            .await?
            .ok_or_else(|| RetakeError::not_found("Department", id))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.departments.delete(id).await? {
            return Err(RetakeError::not_found("Department", id));
        }
        info!(department_id = id, "Department deleted");
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

//! Course service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{Course, CourseDetails, CourseRequest};
use crate::utils::errors::{RetakeError, Result};
use crate::validation::{rules, uniqueness, ValidationErrors};

#[derive(Clone, Debug)]
pub struct CourseService {
    db: DatabaseService,
}

impl CourseService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<Course>> {
        self.db.courses.find_all().await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<CourseDetails> {
        let course = self
            .db
            .courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| RetakeError::not_found("Course", id))?;
        self.details(course).await
    }

    pub async fn create(&self, request: &CourseRequest) -> Result<CourseDetails> {
        rules::check_course(request).into_result()?;
        self.check_links(request).await?;
        uniqueness::check_course(&self.db, request, None).await?.into_result()?;

        let course = self.db.courses.create(request).await?;
        info!(course_id = course.id, name = %course.name, "Course created");
        self.details(course).await
    }

    /// Replaces all fields and both link sets
    pub async fn update(&self, id: i32, request: &CourseRequest) -> Result<CourseDetails> {
        rules::check_course(request).into_result()?;
        self.find_by_id(id).await?;
        self.check_links(request).await?;
        uniqueness::check_course(&self.db, request, Some(id)).await?.into_result()?;

        let course = self
            .db
            .courses
            .update(id, request)
            .await?
            .ok_or_else(|| RetakeError::not_found("Course", id))?;
        self.details(course).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.db.courses.delete(id).await? {
            return Err(RetakeError::not_found("Course", id));
        }
        info!(course_id = id, "Course deleted");
        Ok(())
    }

    async fn details(&self, course: Course) -> Result<CourseDetails> {
        let institute_ids = self.db.courses.institute_ids(course.id).await?;
        let specialization_ids = self.db.courses.specialization_ids(course.id).await?;
        Ok(CourseDetails {
            course,
            institute_ids,
            specialization_ids,
        })
    }

    async fn check_links(&self, request: &CourseRequest) -> Result<()> {
        let mut errors = ValidationErrors::new();

        for id in &request.institute_ids {
            if self.db.institutes.find_by_id(*id).await?.is_none() {
                errors.reject("institute_ids", &format!("Unknown institute {}", id));
            }
        }
        for id in &request.specialization_ids {
            if self.db.specializations.find_by_id(*id).await?.is_none() {
                errors.reject("specialization_ids", &format!("Unknown specialization {}", id));
            }
        }

        Ok(errors.into_result()?)
    }
}

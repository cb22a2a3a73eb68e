//! Test helpers module
//!
//! This module provides utilities and helpers for testing RetakeManager:
//! database setup, generated payloads and a ready-made catalog.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;

use RetakeManager::models::{Course, Role, UserProfile};
use RetakeManager::{ServiceFactory, Settings};

/// Settings with a cheap bcrypt cost for tests
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.security.bcrypt_cost = 4;
    settings
}

/// Database plus services wired over it
pub struct TestContext {
    pub database: TestDatabase,
    pub services: ServiceFactory,
    pub settings: Settings,
}

/// Catalog shared by lifecycle tests: one specialization with two courses,
/// a cabinet, a teacher and an admin
pub struct Catalog {
    pub institute_id: i32,
    pub specialization_id: i32,
    pub algebra: Course,
    pub physics: Course,
    pub cabinet_id: i32,
    pub teacher: UserProfile,
    pub admin: UserProfile,
}

impl TestContext {
    /// `None` when no database is available; callers return early
    pub async fn new() -> Option<Self> {
        let database = TestDatabase::new().await?;
        let settings = test_settings();
        let services = ServiceFactory::new(database.pool.clone(), settings.clone());
        Some(Self {
            database,
            services,
            settings,
        })
    }

    pub async fn catalog(&self) -> Catalog {
        let institute = self
            .services
            .institutes
            .create(&institute_request("Institute of Mathematics"))
            .await
            .expect("create institute");
        let specialization = self
            .services
            .specializations
            .create(&specialization_request("Applied Mathematics", "01.03.04", Some(institute.id)))
            .await
            .expect("create specialization");
        let algebra = self
            .services
            .courses
            .create(&course_request("Algebra", institute.id, specialization.id))
            .await
            .expect("create algebra")
            .course;
        let physics = self
            .services
            .courses
            .create(&course_request("Physics", institute.id, specialization.id))
            .await
            .expect("create physics")
            .course;
        let cabinet = self
            .services
            .cabinets
            .create(&cabinet_request(101))
            .await
            .expect("create cabinet");
        let teacher = self
            .services
            .registration
            .register(&user_request(Role::Teacher))
            .await
            .expect("register teacher");
        let admin = self
            .services
            .registration
            .register_admin(&user_request(Role::Admin))
            .await
            .expect("register admin");

        Catalog {
            institute_id: institute.id,
            specialization_id: specialization.id,
            algebra,
            physics,
            cabinet_id: cabinet.id,
            teacher,
            admin,
        }
    }

    /// Register a student of the catalog's specialization
    pub async fn student(&self, catalog: &Catalog) -> UserProfile {
        let mut request = user_request(Role::Student);
        request.specialization_id = Some(catalog.specialization_id);
        self.services
            .registration
            .register(&request)
            .await
            .expect("register student")
    }

    /// Register a student and assign them retakes of the given courses
    pub async fn student_with_retakes(&self, catalog: &Catalog, course_ids: Vec<i32>) -> UserProfile {
        let student = self.student(catalog).await;
        let untreated = self
            .services
            .untreated
            .find_by_user(student.id)
            .await
            .expect("find untreated")
            .expect("student is untreated");
        self.services
            .retakes
            .assign(catalog.admin.id, untreated.id, &RetakeManager::models::RetakeAssignment { course_ids })
            .await
            .expect("assign retakes");
        student
    }
}

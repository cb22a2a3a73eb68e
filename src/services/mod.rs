//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod cabinet;
pub mod course;
pub mod department;
pub mod event;
pub mod institute;
pub mod past_retake;
pub mod registration;
pub mod retake;
pub mod specialization;
pub mod untreated_student;

// Re-export commonly used services
pub use auth::{AccessService, Actor};
pub use cabinet::CabinetService;
pub use course::CourseService;
pub use department::DepartmentService;
pub use event::EventService;
pub use institute::InstituteService;
pub use past_retake::PastRetakeService;
pub use registration::RegistrationService;
pub use retake::RetakeService;
pub use specialization::SpecializationService;
pub use untreated_student::UntreatedStudentService;

use crate::config::Settings;
use crate::database::{DatabasePool, DatabaseService};

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub database: DatabaseService,
    pub access: AccessService,
    pub institutes: InstituteService,
    pub departments: DepartmentService,
    pub specializations: SpecializationService,
    pub courses: CourseService,
    pub cabinets: CabinetService,
    pub events: EventService,
    pub registration: RegistrationService,
    pub retakes: RetakeService,
    pub untreated: UntreatedStudentService,
    pub past_retakes: PastRetakeService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(pool: DatabasePool, settings: Settings) -> Self {
        let db = DatabaseService::new(pool);

        Self {
            access: AccessService::new(db.clone()),
            institutes: InstituteService::new(db.clone()),
            departments: DepartmentService::new(db.clone()),
            specializations: SpecializationService::new(db.clone()),
            courses: CourseService::new(db.clone()),
            cabinets: CabinetService::new(db.clone()),
            events: EventService::new(db.clone()),
            registration: RegistrationService::new(db.clone(), settings.clone()),
            retakes: RetakeService::new(db.clone(), settings),
            untreated: UntreatedStudentService::new(db.clone()),
            past_retakes: PastRetakeService::new(db.clone()),
            database: db,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = self.database.health_check().await.is_ok();
        ServiceHealthStatus { database_healthy }
    }
}

/// Health status for all services
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }

        issues
    }
}

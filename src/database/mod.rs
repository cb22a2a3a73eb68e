//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{create_pool, health_check, run_migrations, DatabasePool};
pub use repositories::{
    CabinetRepository, CourseRepository, DepartmentRepository, EventRepository,
    InstituteRepository, PastRetakeRepository, RetakeRepository, SpecializationRepository,
    UntreatedStudentRepository, UserRepository,
};
pub use service::DatabaseService;

//! Database service layer
//!
//! Bundles every repository over one shared pool so services can be built
//! from a single value.

use crate::database::{
    CabinetRepository, CourseRepository, DatabasePool, DepartmentRepository, EventRepository,
    InstituteRepository, PastRetakeRepository, RetakeRepository, SpecializationRepository,
    UntreatedStudentRepository, UserRepository,
};
use crate::utils::errors::RetakeError;
use sqlx::{Postgres, Transaction};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub pool: DatabasePool,
    pub institutes: InstituteRepository,
    pub departments: DepartmentRepository,
    pub specializations: SpecializationRepository,
    pub courses: CourseRepository,
    pub cabinets: CabinetRepository,
    pub events: EventRepository,
    pub users: UserRepository,
    pub retakes: RetakeRepository,
    pub past_retakes: PastRetakeRepository,
    pub untreated: UntreatedStudentRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            institutes: InstituteRepository::new(pool.clone()),
            departments: DepartmentRepository::new(pool.clone()),
            specializations: SpecializationRepository::new(pool.clone()),
            courses: CourseRepository::new(pool.clone()),
            cabinets: CabinetRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            retakes: RetakeRepository::new(pool.clone()),
            past_retakes: PastRetakeRepository::new(pool.clone()),
            untreated: UntreatedStudentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction for a multi-step lifecycle operation
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, RetakeError> {
        Ok(self.pool.begin().await?)
    }

    pub async fn health_check(&self) -> Result<(), RetakeError> {
        super::connection::health_check(&self.pool).await
    }
}

//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod cabinet;
pub mod course;
pub mod department;
pub mod event;
pub mod institute;
pub mod past_retake;
pub mod retake;
pub mod specialization;
pub mod untreated_student;
pub mod user;

// Re-export repositories
pub use cabinet::CabinetRepository;
pub use course::CourseRepository;
pub use department::DepartmentRepository;
pub use event::EventRepository;
pub use institute::InstituteRepository;
pub use past_retake::PastRetakeRepository;
pub use retake::RetakeRepository;
pub use specialization::SpecializationRepository;
pub use untreated_student::UntreatedStudentRepository;
pub use user::UserRepository;

//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod cabinet;
pub mod course;
pub mod department;
pub mod event;
pub mod institute;
pub mod retake;
pub mod specialization;
pub mod user;

// Re-export commonly used models
pub use cabinet::{Cabinet, CabinetRequest};
pub use course::{Course, CourseDetails, CourseRequest};
pub use department::{Department, DepartmentRequest};
pub use event::{AttendanceMark, CheckRetakesRequest, CheckRetakesSummary, Event, EventRequest, EventView, RetakeOutcome, SignEventRequest};
pub use institute::{Institute, InstituteRequest};
pub use retake::{CreateRetakeRequest, NewPastRetake, PastRetake, PastRetakeResult, Retake, RetakeAssignment, RetakeView, RetakesInfo, UntreatedStudent, UntreatedStudentDetails, UpdateRetakeRequest};
pub use specialization::{Specialization, SpecializationRequest};
pub use user::{NewUser, Role, User, UserProfile, UserRequest};

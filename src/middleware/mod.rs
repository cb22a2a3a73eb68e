//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{authenticate, USER_ID_HEADER};
pub use logging::{log_requests, REQUEST_ID_HEADER};

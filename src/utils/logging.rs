//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the retake lifecycle.

use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer and must live as long as the
/// process; `None` when file output is disabled.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = if config.file_path.is_empty() {
        (None, None)
    } else {
        std::fs::create_dir_all(&config.file_path)?;
        let file_appender = tracing_appender::rolling::daily(&config.file_path, "retakes.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .boxed();
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(admin_id: i32, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log a student signing up for an event
pub fn log_event_signup(event_id: i32, user_id: i32, seats_left: i32) {
    info!(
        event_id = event_id,
        user_id = user_id,
        seats_left = seats_left,
        "Student signed up for retake event"
    );
}

/// Log the recorded outcome of a retake attempt
pub fn log_retake_outcome(event_id: i32, user_id: i32, subject: &str, result: &str, attempts_left: Option<i32>) {
    info!(
        event_id = event_id,
        user_id = user_id,
        subject = subject,
        result = result,
        attempts_left = attempts_left,
        "Retake outcome recorded"
    );
}

pub fn log_expulsion(user_id: i32, subject: &str) {
    warn!(
        user_id = user_id,
        subject = subject,
        "Student expelled after last failed attempt"
    );
}

/// Log database operations that failed
pub fn log_database_failure(operation: &str, error: &dyn std::fmt::Display) {
    error!(
        operation = operation,
        error = %error,
        "Database operation failed"
    );
}

//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{RetakeError, Result};
use crate::validation::rules::MAX_ATTEMPTS;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_retakes_config(&settings.retakes)?;
    validate_security_config(&settings.security)?;

    Ok(())
}

fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(RetakeError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(RetakeError::Config("Server port must be greater than 0".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(RetakeError::Config("Database URL is required".to_string()));
    }

    let url = url::Url::parse(&config.url)?;
    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(RetakeError::Config(format!(
            "Unsupported database scheme: {}",
            url.scheme()
        )));
    }

    if config.max_connections == 0 {
        return Err(RetakeError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(RetakeError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RetakeError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RetakeError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

fn validate_retakes_config(config: &super::RetakesConfig) -> Result<()> {
    if config.default_attempts < 1 {
        return Err(RetakeError::Config(
            "Default retake attempts must be at least 1".to_string(),
        ));
    }

    if config.max_attempts > MAX_ATTEMPTS {
        return Err(RetakeError::Config(format!(
            "Max retake attempts cannot exceed {}",
            MAX_ATTEMPTS
        )));
    }

    if config.default_attempts > config.max_attempts {
        return Err(RetakeError::Config(
            "Default retake attempts cannot exceed max attempts".to_string(),
        ));
    }

    Ok(())
}

fn validate_security_config(config: &super::SecurityConfig) -> Result<()> {
    // bcrypt accepts costs in 4..=31
    if !(4..=31).contains(&config.bcrypt_cost) {
        return Err(RetakeError::Config(format!(
            "Invalid bcrypt cost: {}",
            config.bcrypt_cost
        )));
    }

    Ok(())
}

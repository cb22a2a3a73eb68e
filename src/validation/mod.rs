//! Request validation
//!
//! Validation runs in two phases. Field rules are pure checks on the request
//! payload; uniqueness rules look up existing rows and only run once the
//! field rules passed. Both report into the same [`ValidationErrors`] list so
//! clients get every problem with a form at once.

pub mod rules;
pub mod uniqueness;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rejected value on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// True when a row found by a unique key belongs to another entity than the one being saved
pub fn clashes(existing: Option<i32>, current: Option<i32>) -> bool {
    matches!(existing, Some(found) if Some(found) != current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clashes_ignores_own_row() {
        assert!(!clashes(None, None));
        assert!(!clashes(None, Some(3)));
        assert!(clashes(Some(3), None));
        assert!(!clashes(Some(3), Some(3)));
        assert!(clashes(Some(3), Some(4)));
    }

    #[test]
    fn test_errors_collect_and_display() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.reject("name", "must not be empty");
        errors.reject("code", "must be 8 characters long");

        assert!(errors.has_field("code"));
        assert!(!errors.has_field("institute_id"));
        assert_eq!(errors.to_string(), "name: must not be empty; code: must be 8 characters long");
        assert!(errors.into_result().is_err());
    }
}

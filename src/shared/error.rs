//! Shared Error Types
//!
//! Errors that can be raised without any network or UI involvement, most
//! importantly client-side form validation. A validation failure blocks the
//! action it guards; no request is ever made for an invalid form.
//!
//! # Usage
//!
//! ```rust
//! use docshelf::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Please enter a valid email address");
//! assert_eq!(error.user_message(), "Please enter a valid email address");
//! ```
use thiserror::Error;

/// Errors that can occur independently of the backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message suitable for showing inline next to a form
    pub fn user_message(&self) -> &str {
        match self {
            Self::SerializationError { message } | Self::ValidationError { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("email", "Invalid email format");
        match error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "Invalid email format");
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("title", "Title is required");
        let display = format!("{}", error);
        assert!(display.contains("title"));
        assert!(display.contains("Title is required"));
    }

    #[test]
    fn test_user_message_is_bare() {
        let error = SharedError::validation("password", "Password is required");
        assert_eq!(error.user_message(), "Password is required");
    }

    #[test]
    fn test_from_serde_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{ invalid json }");
        let shared_error: SharedError = result.unwrap_err().into();

        match shared_error {
            SharedError::SerializationError { .. } => {}
            _ => panic!("Expected SerializationError from serde error"),
        }
    }
}

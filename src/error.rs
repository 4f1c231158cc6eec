//! Custom error types for object-tracker
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for object-tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A change log query was built incorrectly (e.g. filter with no attributes)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A snapshot query was made before any initial state was set
    #[error("Initial state missing: call set_initial_state before comparing against a snapshot")]
    InitialStateMissing,

    /// An observer rejected a change notification
    #[error("Observer error: {0}")]
    Observer(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl TrackerError {
    /// Create an "invalid operation" error for an empty filter/exclude call
    pub fn missing_attributes(operation: &str) -> Self {
        Self::InvalidOperation(format!("{} needs at least one attribute", operation))
    }

    /// Check if this is an invalid operation error
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation(_))
    }

    /// Check if this is a missing initial state error
    pub fn is_initial_state_missing(&self) -> bool {
        matches!(self, Self::InitialStateMissing)
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for object-tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("bad settings".into());
        assert_eq!(err.to_string(), "Configuration error: bad settings");
    }

    #[test]
    fn test_missing_attributes_error() {
        let err = TrackerError::missing_attributes("filter");
        assert_eq!(
            err.to_string(),
            "Invalid operation: filter needs at least one attribute"
        );
        assert!(err.is_invalid_operation());
        assert!(!err.is_initial_state_missing());
    }

    #[test]
    fn test_initial_state_missing() {
        let err = TrackerError::InitialStateMissing;
        assert!(err.is_initial_state_missing());
        assert!(err.to_string().contains("set_initial_state"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tracker_err: TrackerError = io_err.into();
        assert!(matches!(tracker_err, TrackerError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let tracker_err: TrackerError = json_err.into();
        assert!(matches!(tracker_err, TrackerError::Json(_)));
    }
}

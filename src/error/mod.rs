// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for cmlint.
//!
//! A failing commit message is not an error: rule violations are collected as
//! findings in a [`ValidationResult`](crate::rules::ValidationResult). The
//! types here cover what stops a run: bad configuration, unusable input and
//! I/O failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cmlint operations.
#[derive(Error, Debug)]
pub enum LintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Input message errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // Raised by the CLI once findings have been reported
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Configuration-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Unknown rule: '{rule}'")]
    UnknownRule { rule: String },

    #[error("Invalid severity for '{rule}': {code} (expected 0, 1 or 2)")]
    InvalidSeverity { rule: String, code: String },

    #[error("Invalid applicability for '{rule}': '{value}' (expected \"always\" or \"never\")")]
    InvalidApplicability { rule: String, value: String },

    #[error("Missing parameters for '{rule}'")]
    MissingParameters { rule: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown preset: '{name}'")]
    UnknownPreset { name: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Errors about the message handed to the evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("Empty commit message")]
    EmptyMessage,
}

/// Raised when checked messages did not pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{errors} error(s), {warnings} warning(s) found")]
    Failed { errors: usize, warnings: usize },
}

/// Result type alias for cmlint operations.
pub type Result<T> = std::result::Result<T, LintError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| LintError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config"),
        };
        assert!(err.to_string().contains("/path/to/config"));
    }

    #[test]
    fn test_invalid_severity_display() {
        let err = ConfigError::InvalidSeverity {
            rule: "type-enum".to_string(),
            code: "3".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("type-enum"));
        assert!(text.contains('3'));
    }

    #[test]
    fn test_lint_error_from_config_error() {
        let config_err = ConfigError::MissingParameters {
            rule: "subject-max-length".to_string(),
        };
        let err: LintError = config_err.into();
        assert!(err.to_string().contains("subject-max-length"));
    }

    #[test]
    fn test_result_ext_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk gone",
        ));
        let err = res.context("reading message").unwrap_err();
        assert_eq!(err.to_string(), "reading message: disk gone");
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! cmlint - rule-based commit message linter
//!
//! Parses commit messages into `type(scope): subject` headers and checks them
//! against declarative rules written as `[severity, applicability, value]`.
//!
//! # Features
//!
//! - **Rule Evaluator**: `type-enum`, `subject-case`, `subject-max-length`
//!   and the rest of the Conventional Commits baseline
//! - **Severities**: rules can be disabled, warn, or fail the check
//! - **Presets**: `extends = ["conventional"]` pulls in the baseline rules
//! - **Ignores**: merge, revert and autosquash commits are skipped
//!
//! # Example
//!
//! ```
//! use cmlint::config::LintConfig;
//! use cmlint::rules::{evaluate, RuleSet};
//!
//! let rules = RuleSet::from_config(&LintConfig::default()).unwrap();
//!
//! let result = evaluate(&rules, "feat: add login flow").unwrap();
//! assert!(result.findings.is_empty());
//!
//! let result = evaluate(&rules, "Fix: Something Broke").unwrap();
//! assert!(!result.is_valid());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod rules;

// Re-exports for convenience
pub use config::LintConfig;
pub use error::{LintError, Result};
pub use rules::{evaluate, RuleEngine, RuleSet, ValidationResult};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of cmlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}

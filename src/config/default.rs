// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values and built-in presets.

use crate::error::{ConfigError, Result};

use super::schema::{Applicability, LintConfig, RuleEntry, RuleValue, Severity};

/// Commit types accepted by the project rules.
pub const PROJECT_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "test", "chore", "perf", "ci", "build", "revert",
];

/// Maximum subject length of the project rules.
pub const PROJECT_SUBJECT_MAX_LENGTH: i64 = 50;

fn project_types() -> RuleValue {
    RuleValue::list(PROJECT_TYPES.iter().copied())
}

fn error_always(value: Option<RuleValue>) -> RuleEntry {
    RuleEntry::new(Severity::Error, Applicability::Always, value)
}

/// The default configuration: type-enum, subject-case and subject-max-length.
pub fn project_rules() -> LintConfig {
    LintConfig::empty()
        .with_rule("type-enum", error_always(Some(project_types())))
        .with_rule(
            "subject-case",
            error_always(Some(RuleValue::Text("lower-case".to_string()))),
        )
        .with_rule(
            "subject-max-length",
            error_always(Some(RuleValue::Number(PROJECT_SUBJECT_MAX_LENGTH))),
        )
}

/// The Conventional Commits baseline.
pub fn conventional() -> LintConfig {
    LintConfig::empty()
        .with_rule(
            "body-leading-blank",
            RuleEntry::new(Severity::Warning, Applicability::Always, None),
        )
        .with_rule(
            "body-max-line-length",
            error_always(Some(RuleValue::Number(100))),
        )
        .with_rule(
            "footer-leading-blank",
            RuleEntry::new(Severity::Warning, Applicability::Always, None),
        )
        .with_rule("header-max-length", error_always(Some(RuleValue::Number(100))))
        .with_rule(
            "subject-case",
            RuleEntry::new(
                Severity::Error,
                Applicability::Never,
                Some(RuleValue::list([
                    "sentence-case",
                    "start-case",
                    "pascal-case",
                    "upper-case",
                ])),
            ),
        )
        .with_rule(
            "subject-empty",
            RuleEntry::new(Severity::Error, Applicability::Never, None),
        )
        .with_rule(
            "subject-full-stop",
            RuleEntry::new(
                Severity::Error,
                Applicability::Never,
                Some(RuleValue::Text(".".to_string())),
            ),
        )
        .with_rule(
            "type-case",
            error_always(Some(RuleValue::Text("lower-case".to_string()))),
        )
        .with_rule(
            "type-empty",
            RuleEntry::new(Severity::Error, Applicability::Never, None),
        )
        .with_rule("type-enum", error_always(Some(project_types())))
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Result<LintConfig> {
    match name {
        "conventional" | "@commitlint/config-conventional" => Ok(conventional()),
        _ => Err(ConfigError::UnknownPreset {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# cmlint configuration

# Presets applied underneath the rules below
extends = ["conventional"]

# Skip merge, revert and fixup!/squash! messages
default_ignores = true

# Extra header patterns (regular expressions) to skip
ignores = []

# Each rule is [severity, applicability, parameters]
#   severity:      0 = disabled, 1 = warning, 2 = error
#   applicability: "always" or "never"
[rules]
"type-enum" = [2, "always", ["feat", "fix", "docs", "style", "refactor", "test", "chore", "perf", "ci", "build", "revert"]]
"subject-case" = [2, "always", "lower-case"]
"subject-max-length" = [2, "always", 50]

[ui]
color = true
hints = true
"#
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit validation.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::CommitMessage;
use crate::config::{Applicability, LintConfig, Severity};
use crate::error::{ConfigError, Result};

use super::builtin::Rule;
use super::ruleset::RuleSet;
use super::validator::{Finding, ValidationResult};

lazy_static! {
    /// Headers git writes itself; these are not checked by default.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"^Merge pull request #?\S+",
        r"^Merge (?:remote-tracking )?branch '?\S+",
        r"^Merge tag '?\S+",
        r"^Merge \S+ into \S+",
        r"^Merged .+ (?:in|into) \S+",
        r"^Automatic merge",
        r"^Auto-merged .+ into \S+",
        r"^[Rr]evert ",
        r"^(?:fixup|squash|amend)! ",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// Evaluate a message against a rule set.
///
/// Violations are reported as findings; only an empty message is an error.
pub fn evaluate(rules: &RuleSet, message: &str) -> Result<ValidationResult> {
    let parsed = CommitMessage::parse(message)?;
    let mut result = ValidationResult::new(parsed.header.clone());
    result.findings = rules
        .active()
        .filter_map(|(rule, severity, when)| check_rule(&**rule, severity, when, &parsed))
        .collect();
    Ok(result)
}

/// Run one rule and turn a violation into a finding.
fn check_rule(
    rule: &dyn Rule,
    severity: Severity,
    when: Applicability,
    message: &CommitMessage,
) -> Option<Finding> {
    let holds = rule.test(message)?;
    let expected = when == Applicability::Always;

    if holds == expected {
        return None;
    }

    tracing::debug!("Rule {} failed ({})", rule.name(), severity);

    Some(Finding {
        rule: rule.name().to_string(),
        severity,
        message: rule.describe(message, when),
        suggestion: rule.suggestion(when),
        line: rule.line(message),
    })
}

#[derive(Debug, Clone)]
struct CustomRule {
    rule: Arc<dyn Rule>,
    severity: Severity,
    when: Applicability,
}

/// Rule engine for validating commit messages.
///
/// Adds ignore patterns and caller-supplied rules on top of a [`RuleSet`].
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RuleSet,
    default_ignores: bool,
    ignores: Vec<Regex>,
    custom_rules: Vec<CustomRule>,
}

impl RuleEngine {
    /// Create a new rule engine with the given rules.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            default_ignores: true,
            ignores: Vec::new(),
            custom_rules: Vec::new(),
        }
    }

    /// Build an engine from a configuration.
    pub fn from_config(config: &LintConfig) -> Result<Self> {
        let rules = RuleSet::from_config(config)?;
        let mut engine = Self::new(rules).with_default_ignores(config.default_ignores);
        for pattern in &config.ignores {
            engine.add_ignore(pattern)?;
        }
        Ok(engine)
    }

    /// Enable or disable the built-in ignore patterns.
    pub fn with_default_ignores(mut self, enabled: bool) -> Self {
        self.default_ignores = enabled;
        self
    }

    /// Skip messages whose header matches `pattern`.
    pub fn add_ignore(&mut self, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
            key: "ignores".to_string(),
            message: format!("invalid pattern '{}': {}", pattern, e),
        })?;
        self.ignores.push(regex);
        Ok(())
    }

    /// Add a custom rule to the engine. Custom rules run after the rule set.
    pub fn add_rule(&mut self, rule: Arc<dyn Rule>, severity: Severity, when: Applicability) {
        self.custom_rules.push(CustomRule {
            rule,
            severity,
            when,
        });
    }

    /// The compiled rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether a header is skipped.
    pub fn is_ignored(&self, header: &str) -> bool {
        let builtin = self.default_ignores && DEFAULT_IGNORES.iter().any(|re| re.is_match(header));
        builtin || self.ignores.iter().any(|re| re.is_match(header))
    }

    /// Validate a commit message.
    pub fn validate(&self, message: &CommitMessage) -> ValidationResult {
        let mut result = ValidationResult::new(message.header.clone());

        if self.is_ignored(&message.header) {
            tracing::debug!("Ignoring message: {}", message.header);
            result.ignored = true;
            return result;
        }

        for (rule, severity, when) in self.rules.active() {
            if let Some(finding) = check_rule(&**rule, severity, when, message) {
                result.findings.push(finding);
            }
        }

        for custom in &self.custom_rules {
            if custom.severity == Severity::Disabled {
                continue;
            }
            if let Some(finding) =
                check_rule(&*custom.rule, custom.severity, custom.when, message)
            {
                result.findings.push(finding);
            }
        }

        result
    }

    /// Validate a commit message string.
    pub fn validate_str(&self, message: &str) -> Result<ValidationResult> {
        let parsed = CommitMessage::parse(message)?;
        Ok(self.validate(&parsed))
    }

    /// Validate several messages, stopping at the first unusable one.
    pub fn validate_all<S: AsRef<str>>(&self, messages: &[S]) -> Result<Vec<ValidationResult>> {
        messages
            .iter()
            .map(|m| self.validate_str(m.as_ref()))
            .collect()
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the structures that can be loaded from `cmlint.toml` (or a JSON
//! file). Rule declarations are kept in their raw `[severity, when, value]`
//! form here; [`RuleSet`](crate::rules::RuleSet) validates and compiles them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The main configuration structure for cmlint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Presets applied underneath the local rules.
    pub extends: Vec<String>,

    /// Skip merge, revert and autosquash messages.
    pub default_ignores: bool,

    /// Extra header patterns to skip.
    pub ignores: Vec<String>,

    /// Rule declarations keyed by rule name.
    pub rules: BTreeMap<String, RuleEntry>,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl Default for LintConfig {
    fn default() -> Self {
        super::default::project_rules()
    }
}

impl LintConfig {
    /// An empty configuration: no presets, no rules.
    pub fn empty() -> Self {
        Self {
            extends: Vec::new(),
            default_ignores: true,
            ignores: Vec::new(),
            rules: BTreeMap::new(),
            ui: UiConfig::default(),
        }
    }

    /// Add or replace a rule declaration.
    pub fn with_rule(mut self, name: impl Into<String>, entry: RuleEntry) -> Self {
        self.rules.insert(name.into(), entry);
        self
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Whether to print fix suggestions under findings.
    pub hints: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            hints: true,
        }
    }
}

/// A raw rule declaration: `[severity, applicability, parameters]`.
///
/// Only the severity is mandatory at this level; what else a rule needs is
/// checked when the rule set is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleEntry(pub Vec<RuleValue>);

impl RuleEntry {
    /// Build an entry from typed parts.
    pub fn new(severity: Severity, when: Applicability, value: Option<RuleValue>) -> Self {
        let mut items = vec![
            RuleValue::Number(severity.code()),
            RuleValue::Text(when.as_str().to_string()),
        ];
        items.extend(value);
        Self(items)
    }

    /// An entry that turns a rule off.
    pub fn disabled() -> Self {
        Self(vec![RuleValue::Number(0)])
    }
}

/// A scalar or list value inside a rule declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    /// Build a list value from string-like items.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleValue::Number(_) => "number",
            RuleValue::Text(_) => "string",
            RuleValue::List(_) => "list",
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Number(n) => write!(f, "{}", n),
            RuleValue::Text(s) => write!(f, "\"{}\"", s),
            RuleValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Enforcement level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Disabled,
    Warning,
    Error,
}

impl Severity {
    /// Numeric code used in rule declarations.
    pub fn code(&self) -> i64 {
        match self {
            Severity::Disabled => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    /// Map a declaration code to a severity.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Severity::Disabled),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    /// Get the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Disabled => "disabled",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a rule's condition must or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Always => "always",
            Applicability::Never => "never",
        }
    }
}

impl FromStr for Applicability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Applicability::Always),
            "never" => Ok(Applicability::Never),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

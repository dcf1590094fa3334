// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use crate::config::Severity;
use console::{style, Style};
use serde::Serialize;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Name of the rule that failed.
    pub rule: String,
    /// Declared severity of the rule.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    pub suggestion: Option<String>,
    /// Line number where the issue was found.
    pub line: Option<usize>,
}

impl Finding {
    /// Whether this finding fails the check.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the finding for terminal output.
    pub fn format(&self, hints: bool) -> String {
        let (prefix, code_style) = if self.is_error() {
            (style("✗").red().bold(), Style::new().red())
        } else {
            (style("⚠").yellow().bold(), Style::new().yellow())
        };

        let mut output = format!(
            "{} {} {}",
            prefix,
            code_style.apply_to(&self.rule),
            self.message
        );

        if hints {
            if let Some(ref suggestion) = self.suggestion {
                output.push_str(&format!(
                    "\n  {} {}",
                    style("→").dim(),
                    style(suggestion).dim()
                ));
            }
        }

        output
    }
}

/// Result of validating one commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// The header of the checked message.
    pub header: String,
    /// Where the message came from (file name, argument), if known.
    pub source: Option<String>,
    /// Whether the message matched an ignore pattern and was not checked.
    pub ignored: bool,
    /// Findings, in rule evaluation order.
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    /// Create a new validation result.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            source: None,
            ignored: false,
            findings: Vec::new(),
        }
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Highest severity among the findings (`Disabled` when clean).
    pub fn outcome(&self) -> Severity {
        self.findings
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::Disabled)
    }

    /// Check if the validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.outcome() < Severity::Error
    }

    /// Error-severity findings.
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    /// Warning-severity findings.
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    /// Get the total number of findings.
    pub fn issue_count(&self) -> usize {
        self.findings.len()
    }

    /// Process exit code for this result alone.
    pub fn exit_code(&self, strict: bool) -> i32 {
        match self.outcome() {
            Severity::Error => 1,
            Severity::Warning if strict => 1,
            _ => 0,
        }
    }

    /// Render in text format.
    pub fn format_text(&self, hints: bool) -> String {
        let status = if self.ignored {
            style("-").dim()
        } else if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };

        let mut lines = Vec::new();
        match self.source {
            Some(ref source) => lines.push(format!(
                "{} {} {}",
                status,
                style(source).cyan(),
                self.header
            )),
            None => lines.push(format!("{} {}", status, self.header)),
        }

        for finding in &self.findings {
            lines.push(format!("  {}", finding.format(hints)));
        }

        if !self.findings.is_empty() {
            lines.push(format!("  {}", style(self.summary()).dim()));
        }

        if self.ignored {
            lines.push(format!("  {}", style("ignored").dim()));
        }

        lines.join("\n")
    }

    /// Render as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "outcome": self.outcome(),
            "source": self.source,
            "header": self.header,
            "ignored": self.ignored,
            "findings": self.findings,
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let errors = self.errors().count();
        let warnings = self.warnings().count();
        if self.ignored {
            "Ignored".to_string()
        } else if self.is_valid() {
            if warnings == 0 {
                "Valid".to_string()
            } else {
                format!("Valid ({} warnings)", warnings)
            }
        } else {
            format!("Invalid ({} errors, {} warnings)", errors, warnings)
        }
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Every rule reports whether its condition holds for a message. The engine
//! compares that against the declared [`Applicability`]: under `always` the
//! condition must hold, under `never` it must not.

use std::sync::Arc;

use crate::commit::CommitMessage;
use crate::config::{Applicability, RuleValue};
use crate::error::ConfigError;

use super::case::Case;

/// Names of all built-in rules.
pub const RULE_NAMES: &[&str] = &[
    "body-leading-blank",
    "body-max-line-length",
    "footer-leading-blank",
    "header-max-length",
    "scope-case",
    "scope-empty",
    "scope-enum",
    "subject-case",
    "subject-empty",
    "subject-full-stop",
    "subject-max-length",
    "subject-min-length",
    "type-case",
    "type-empty",
    "type-enum",
];

/// A check over a parsed commit message.
pub trait Rule: std::fmt::Debug + Send + Sync {
    /// Get the rule name.
    fn name(&self) -> &str;

    /// Whether the rule's condition holds, or `None` if the rule does not
    /// apply to this message.
    fn test(&self, message: &CommitMessage) -> Option<bool>;

    /// Explain a violation under the given applicability.
    fn describe(&self, message: &CommitMessage, when: Applicability) -> String;

    /// How to fix a violation.
    fn suggestion(&self, _when: Applicability) -> Option<String> {
        None
    }

    /// One-based line the finding points at.
    fn line(&self, _message: &CommitMessage) -> Option<usize> {
        Some(1)
    }
}

/// Whether `name` is a built-in rule.
pub fn is_known_rule(name: &str) -> bool {
    RULE_NAMES.contains(&name)
}

/// Build a built-in rule from its declared parameters.
pub fn build_rule(name: &str, value: Option<&RuleValue>) -> Result<Arc<dyn Rule>, ConfigError> {
    let rule: Arc<dyn Rule> = match name {
        "type-enum" => Arc::new(TypeEnum {
            allowed: require_list(name, value)?,
        }),
        "type-case" => Arc::new(TypeCase {
            cases: require_cases(name, value)?,
        }),
        "type-empty" => Arc::new(TypeEmpty),
        "scope-enum" => Arc::new(ScopeEnum {
            allowed: require_list(name, value)?,
        }),
        "scope-case" => Arc::new(ScopeCase {
            cases: require_cases(name, value)?,
        }),
        "scope-empty" => Arc::new(ScopeEmpty),
        "subject-case" => Arc::new(SubjectCase {
            cases: require_cases(name, value)?,
        }),
        "subject-empty" => Arc::new(SubjectEmpty),
        "subject-full-stop" => Arc::new(SubjectFullStop {
            stop: optional_text(name, value)?.unwrap_or_else(|| ".".to_string()),
        }),
        "subject-max-length" => Arc::new(SubjectMaxLength {
            max: require_number(name, value)?,
        }),
        "subject-min-length" => Arc::new(SubjectMinLength {
            min: require_number(name, value)?,
        }),
        "header-max-length" => Arc::new(HeaderMaxLength {
            max: require_number(name, value)?,
        }),
        "body-leading-blank" => Arc::new(BodyLeadingBlank),
        "body-max-line-length" => Arc::new(BodyMaxLineLength {
            max: require_number(name, value)?,
        }),
        "footer-leading-blank" => Arc::new(FooterLeadingBlank),
        _ => {
            return Err(ConfigError::UnknownRule {
                rule: name.to_string(),
            })
        }
    };
    Ok(rule)
}

fn missing(rule: &str) -> ConfigError {
    ConfigError::MissingParameters {
        rule: rule.to_string(),
    }
}

fn invalid(rule: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        key: rule.to_string(),
        message,
    }
}

fn require_list(rule: &str, value: Option<&RuleValue>) -> Result<Vec<String>, ConfigError> {
    match value {
        None => Err(missing(rule)),
        Some(RuleValue::List(items)) => Ok(items.clone()),
        Some(other) => Err(invalid(rule, format!("expected a list, got a {}", other.kind()))),
    }
}

fn require_number(rule: &str, value: Option<&RuleValue>) -> Result<usize, ConfigError> {
    match value {
        None => Err(missing(rule)),
        Some(RuleValue::Number(n)) => usize::try_from(*n)
            .map_err(|_| invalid(rule, format!("expected a non-negative number, got {}", n))),
        Some(other) => Err(invalid(rule, format!("expected a number, got a {}", other.kind()))),
    }
}

fn optional_text(rule: &str, value: Option<&RuleValue>) -> Result<Option<String>, ConfigError> {
    match value {
        None => Ok(None),
        Some(RuleValue::Text(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(rule, format!("expected a string, got a {}", other.kind()))),
    }
}

fn require_cases(rule: &str, value: Option<&RuleValue>) -> Result<Vec<Case>, ConfigError> {
    let names = match value {
        None => return Err(missing(rule)),
        Some(RuleValue::Text(name)) => vec![name.clone()],
        Some(RuleValue::List(names)) if !names.is_empty() => names.clone(),
        Some(other) => {
            return Err(invalid(
                rule,
                format!("expected a case name or list of case names, got {}", other),
            ))
        }
    };

    names
        .iter()
        .map(|name| {
            name.parse::<Case>()
                .map_err(|_| invalid(rule, format!("unknown case '{}'", name)))
        })
        .collect()
}

fn join_cases(cases: &[Case]) -> String {
    cases
        .iter()
        .map(Case::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `must` or `must not`, depending on applicability.
fn must(when: Applicability) -> &'static str {
    match when {
        Applicability::Always => "must",
        Applicability::Never => "must not",
    }
}

/// First whitespace-separated word containing a letter.
fn first_significant_word(text: &str) -> Option<&str> {
    text.split_whitespace()
        .find(|word| word.chars().any(char::is_alphabetic))
}

/// Type must be one of the listed tags.
#[derive(Debug, Clone)]
pub struct TypeEnum {
    pub allowed: Vec<String>,
}

impl Rule for TypeEnum {
    fn name(&self) -> &str {
        "type-enum"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        let found = message
            .commit_type
            .as_ref()
            .map(|t| self.allowed.contains(t))
            .unwrap_or(false);
        Some(found)
    }

    fn describe(&self, message: &CommitMessage, when: Applicability) -> String {
        let found = message.commit_type.as_deref().unwrap_or("");
        format!(
            "type '{}' {} be one of [{}]",
            found,
            must(when),
            self.allowed.join(", ")
        )
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => Some(format!("Use one of: {}", self.allowed.join(", "))),
            Applicability::Never => Some("Use a different commit type".to_string()),
        }
    }
}

/// Type must be written in one of the listed cases.
#[derive(Debug, Clone)]
pub struct TypeCase {
    pub cases: Vec<Case>,
}

impl Rule for TypeCase {
    fn name(&self) -> &str {
        "type-case"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        let commit_type = message.commit_type.as_deref()?;
        Some(self.cases.iter().any(|c| c.matches(commit_type)))
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("type {} be {}", must(when), join_cases(&self.cases))
    }
}

/// Type must be empty (usually declared `never`).
#[derive(Debug, Clone)]
pub struct TypeEmpty;

impl Rule for TypeEmpty {
    fn name(&self) -> &str {
        "type-empty"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        Some(message.commit_type.is_none())
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("type {} be empty", must(when))
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => None,
            Applicability::Never => Some("Start the header with a type: type: subject".to_string()),
        }
    }
}

/// Scope, if given, must be one of the listed names.
#[derive(Debug, Clone)]
pub struct ScopeEnum {
    pub allowed: Vec<String>,
}

impl Rule for ScopeEnum {
    fn name(&self) -> &str {
        "scope-enum"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        if self.allowed.is_empty() {
            return None;
        }
        let scope = message.scope.as_ref()?;
        Some(self.allowed.contains(scope))
    }

    fn describe(&self, message: &CommitMessage, when: Applicability) -> String {
        format!(
            "scope '{}' {} be one of [{}]",
            message.scope.as_deref().unwrap_or(""),
            must(when),
            self.allowed.join(", ")
        )
    }
}

/// Scope, if given, must be written in one of the listed cases.
#[derive(Debug, Clone)]
pub struct ScopeCase {
    pub cases: Vec<Case>,
}

impl Rule for ScopeCase {
    fn name(&self) -> &str {
        "scope-case"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        let scope = message.scope.as_deref()?;
        Some(self.cases.iter().any(|c| c.matches(scope)))
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("scope {} be {}", must(when), join_cases(&self.cases))
    }
}

/// Scope must be empty.
#[derive(Debug, Clone)]
pub struct ScopeEmpty;

impl Rule for ScopeEmpty {
    fn name(&self) -> &str {
        "scope-empty"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        Some(message.scope.is_none())
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("scope {} be empty", must(when))
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => Some("Remove the scope".to_string()),
            Applicability::Never => {
                Some("Add a scope in parentheses: type(scope): subject".to_string())
            }
        }
    }
}

/// The subject's first significant word must be written in one of the cases.
#[derive(Debug, Clone)]
pub struct SubjectCase {
    pub cases: Vec<Case>,
}

impl Rule for SubjectCase {
    fn name(&self) -> &str {
        "subject-case"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        let word = first_significant_word(message.subject.as_deref()?)?;
        Some(self.cases.iter().any(|c| c.matches(word)))
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("subject {} be {}", must(when), join_cases(&self.cases))
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        if when == Applicability::Always && self.cases == [Case::Lower] {
            Some("Start the subject with a lowercase letter".to_string())
        } else {
            None
        }
    }
}

/// Subject must be empty (usually declared `never`).
#[derive(Debug, Clone)]
pub struct SubjectEmpty;

impl Rule for SubjectEmpty {
    fn name(&self) -> &str {
        "subject-empty"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        Some(message.subject.is_none())
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("subject {} be empty", must(when))
    }
}

/// Subject must end with the given character(s).
#[derive(Debug, Clone)]
pub struct SubjectFullStop {
    pub stop: String,
}

impl Rule for SubjectFullStop {
    fn name(&self) -> &str {
        "subject-full-stop"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        Some(message.subject.as_deref()?.ends_with(self.stop.as_str()))
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("subject {} end with '{}'", must(when), self.stop)
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => Some(format!("Add a trailing '{}'", self.stop)),
            Applicability::Never => Some(format!("Remove the trailing '{}'", self.stop)),
        }
    }
}

/// Subject may have at most `max` characters.
#[derive(Debug, Clone)]
pub struct SubjectMaxLength {
    pub max: usize,
}

impl Rule for SubjectMaxLength {
    fn name(&self) -> &str {
        "subject-max-length"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        message.subject.as_ref()?;
        Some(message.subject_len() <= self.max)
    }

    fn describe(&self, message: &CommitMessage, when: Applicability) -> String {
        match when {
            Applicability::Always => format!(
                "subject is too long: {} characters (max: {})",
                message.subject_len(),
                self.max
            ),
            Applicability::Never => format!(
                "subject must be longer than {} characters",
                self.max
            ),
        }
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => Some(format!(
                "Shorten the subject to {} characters or less",
                self.max
            )),
            Applicability::Never => None,
        }
    }
}

/// Subject must have at least `min` characters.
#[derive(Debug, Clone)]
pub struct SubjectMinLength {
    pub min: usize,
}

impl Rule for SubjectMinLength {
    fn name(&self) -> &str {
        "subject-min-length"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        message.subject.as_ref()?;
        Some(message.subject_len() >= self.min)
    }

    fn describe(&self, message: &CommitMessage, when: Applicability) -> String {
        match when {
            Applicability::Always => format!(
                "subject is too short: {} characters (min: {})",
                message.subject_len(),
                self.min
            ),
            Applicability::Never => format!(
                "subject must be shorter than {} characters",
                self.min
            ),
        }
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => Some("Add more detail to the subject".to_string()),
            Applicability::Never => None,
        }
    }
}

/// Header may have at most `max` characters.
#[derive(Debug, Clone)]
pub struct HeaderMaxLength {
    pub max: usize,
}

impl Rule for HeaderMaxLength {
    fn name(&self) -> &str {
        "header-max-length"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        Some(message.header_len() <= self.max)
    }

    fn describe(&self, message: &CommitMessage, when: Applicability) -> String {
        match when {
            Applicability::Always => format!(
                "header is too long: {} characters (max: {})",
                message.header_len(),
                self.max
            ),
            Applicability::Never => format!("header must be longer than {} characters", self.max),
        }
    }
}

/// The line after the header must be blank when there is more text.
#[derive(Debug, Clone)]
pub struct BodyLeadingBlank;

impl Rule for BodyLeadingBlank {
    fn name(&self) -> &str {
        "body-leading-blank"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        let second = message.lines().nth(1)?;
        Some(second.trim().is_empty())
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("body {} have a leading blank line", must(when))
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => {
                Some("Separate the header from the body with a blank line".to_string())
            }
            Applicability::Never => None,
        }
    }

    fn line(&self, _message: &CommitMessage) -> Option<usize> {
        Some(2)
    }
}

/// Body lines may have at most `max` characters.
#[derive(Debug, Clone)]
pub struct BodyMaxLineLength {
    pub max: usize,
}

impl BodyMaxLineLength {
    fn longest(&self, message: &CommitMessage) -> usize {
        message
            .body_lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl Rule for BodyMaxLineLength {
    fn name(&self) -> &str {
        "body-max-line-length"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        message.body.as_ref()?;
        Some(self.longest(message) <= self.max)
    }

    fn describe(&self, message: &CommitMessage, when: Applicability) -> String {
        match when {
            Applicability::Always => format!(
                "body has a line of {} characters (max: {})",
                self.longest(message),
                self.max
            ),
            Applicability::Never => format!(
                "body must have a line longer than {} characters",
                self.max
            ),
        }
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => Some(format!("Wrap the body at {} characters", self.max)),
            Applicability::Never => None,
        }
    }

    fn line(&self, message: &CommitMessage) -> Option<usize> {
        message
            .lines()
            .enumerate()
            .skip(1)
            .take(message.footer_line.unwrap_or(usize::MAX).saturating_sub(1))
            .find(|(_, l)| l.chars().count() > self.max)
            .map(|(idx, _)| idx + 1)
    }
}

/// The line before the footer must be blank.
#[derive(Debug, Clone)]
pub struct FooterLeadingBlank;

impl Rule for FooterLeadingBlank {
    fn name(&self) -> &str {
        "footer-leading-blank"
    }

    fn test(&self, message: &CommitMessage) -> Option<bool> {
        let idx = message.footer_line?;
        let previous = message.lines().nth(idx - 1)?;
        Some(previous.trim().is_empty())
    }

    fn describe(&self, _message: &CommitMessage, when: Applicability) -> String {
        format!("footer {} have a leading blank line", must(when))
    }

    fn suggestion(&self, when: Applicability) -> Option<String> {
        match when {
            Applicability::Always => {
                Some("Separate the footer from the body with a blank line".to_string())
            }
            Applicability::Never => None,
        }
    }

    fn line(&self, message: &CommitMessage) -> Option<usize> {
        message.footer_line.map(|idx| idx + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> CommitMessage {
        CommitMessage::parse(text).unwrap()
    }

    fn project_types() -> Vec<String> {
        crate::config::default::PROJECT_TYPES
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_known_rules_build() {
        for name in RULE_NAMES {
            let value = match *name {
                "type-enum" | "scope-enum" => Some(RuleValue::list(["a"])),
                "type-case" | "scope-case" | "subject-case" => {
                    Some(RuleValue::Text("lower-case".to_string()))
                }
                "subject-max-length" | "subject-min-length" | "header-max-length"
                | "body-max-line-length" => Some(RuleValue::Number(10)),
                _ => None,
            };
            let rule = build_rule(name, value.as_ref()).unwrap();
            assert_eq!(rule.name(), *name);
        }
    }

    #[test]
    fn test_build_unknown_rule() {
        assert!(matches!(
            build_rule("body-emoji", None),
            Err(ConfigError::UnknownRule { .. })
        ));
    }

    #[test]
    fn test_build_missing_parameters() {
        assert!(matches!(
            build_rule("subject-max-length", None),
            Err(ConfigError::MissingParameters { .. })
        ));
        assert!(matches!(
            build_rule("type-enum", None),
            Err(ConfigError::MissingParameters { .. })
        ));
    }

    #[test]
    fn test_build_wrong_shape() {
        let err = build_rule("subject-max-length", Some(&RuleValue::Text("50".into())));
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));

        let err = build_rule("subject-max-length", Some(&RuleValue::Number(-1)));
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));

        let err = build_rule("subject-case", Some(&RuleValue::Text("shouting".into())));
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_type_enum() {
        let rule = TypeEnum {
            allowed: project_types(),
        };
        for t in crate::config::default::PROJECT_TYPES {
            let msg = parse(&format!("{}: do something", t));
            assert_eq!(rule.test(&msg), Some(true), "type {}", t);
        }
        assert_eq!(rule.test(&parse("Fix: something")), Some(false));
        assert_eq!(rule.test(&parse("wip: something")), Some(false));
        assert_eq!(rule.test(&parse("no type here")), Some(false));
    }

    #[test]
    fn test_subject_case_first_word() {
        let rule = SubjectCase {
            cases: vec![Case::Lower],
        };
        assert_eq!(rule.test(&parse("feat: add login flow")), Some(true));
        assert_eq!(rule.test(&parse("feat: Add login flow")), Some(false));
        assert_eq!(rule.test(&parse("feat: aDd login flow")), Some(false));
        // Later words are not inspected.
        assert_eq!(rule.test(&parse("feat: add OAuth login")), Some(true));
        // Leading punctuation-only words are skipped.
        assert_eq!(rule.test(&parse("feat: - Add login")), Some(false));
        assert_eq!(rule.test(&parse("feat")), None);
    }

    #[test]
    fn test_subject_max_length() {
        let rule = SubjectMaxLength { max: 50 };
        let ok = parse(&format!("chore: {}", "x".repeat(50)));
        let long = parse(&format!("chore: {}", "x".repeat(51)));
        assert_eq!(rule.test(&ok), Some(true));
        assert_eq!(rule.test(&long), Some(false));
        assert!(rule.describe(&long, Applicability::Always).contains("51"));
    }

    #[test]
    fn test_subject_min_length() {
        let rule = SubjectMinLength { min: 5 };
        assert_eq!(rule.test(&parse("fix: typo")), Some(false));
        assert_eq!(rule.test(&parse("fix: a typo")), Some(true));
    }

    #[test]
    fn test_subject_full_stop() {
        let rule = SubjectFullStop {
            stop: ".".to_string(),
        };
        assert_eq!(rule.test(&parse("docs: update readme.")), Some(true));
        assert_eq!(rule.test(&parse("docs: update readme")), Some(false));
    }

    #[test]
    fn test_scope_rules() {
        let rule = ScopeEnum {
            allowed: vec!["core".to_string(), "cli".to_string()],
        };
        assert_eq!(rule.test(&parse("feat(core): x")), Some(true));
        assert_eq!(rule.test(&parse("feat(web): x")), Some(false));
        assert_eq!(rule.test(&parse("feat: x")), None);

        let rule = ScopeCase {
            cases: vec![Case::Kebab],
        };
        assert_eq!(rule.test(&parse("feat(rule-engine): x")), Some(true));
        assert_eq!(rule.test(&parse("feat(RuleEngine): x")), Some(false));

        assert_eq!(ScopeEmpty.test(&parse("feat: x")), Some(true));
        assert_eq!(ScopeEmpty.test(&parse("feat(core): x")), Some(false));
    }

    #[test]
    fn test_body_leading_blank() {
        assert_eq!(BodyLeadingBlank.test(&parse("fix: x")), None);
        assert_eq!(BodyLeadingBlank.test(&parse("fix: x\n\nbody")), Some(true));
        assert_eq!(BodyLeadingBlank.test(&parse("fix: x\nbody")), Some(false));
    }

    #[test]
    fn test_body_max_line_length() {
        let rule = BodyMaxLineLength { max: 10 };
        let msg = parse("fix: x\n\nshort\nthis line is far too long");
        assert_eq!(rule.test(&msg), Some(false));
        assert_eq!(rule.line(&msg), Some(4));
        assert_eq!(rule.test(&parse("fix: x\n\nshort")), Some(true));
        assert_eq!(rule.test(&parse("fix: x")), None);
    }

    #[test]
    fn test_footer_leading_blank() {
        let good = parse("fix: x\n\nbody\n\nRefs #1");
        let bad = parse("fix: x\nRefs #1");
        let in_body = parse("fix: x\n\nbody\nNote: not a trailer\nmore body");
        assert_eq!(FooterLeadingBlank.test(&good), Some(true));
        assert_eq!(FooterLeadingBlank.test(&bad), Some(false));
        assert_eq!(FooterLeadingBlank.line(&bad), Some(2));
        assert_eq!(FooterLeadingBlank.test(&in_body), None);
    }

    #[test]
    fn test_header_max_length() {
        let rule = HeaderMaxLength { max: 10 };
        assert_eq!(rule.test(&parse("fix: short")), Some(true));
        assert_eq!(rule.test(&parse("fix: not short")), Some(false));
    }
}

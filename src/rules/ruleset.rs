// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Compiled, immutable rule sets.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{resolve_config, Applicability, LintConfig, RuleEntry, RuleValue, Severity};
use crate::error::{ConfigError, Result};

use super::builtin::{build_rule, is_known_rule, Rule};

/// A validated rule declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDeclaration {
    pub severity: Severity,
    pub applicability: Applicability,
    pub value: Option<RuleValue>,
}

impl RuleDeclaration {
    /// Create a declaration.
    pub fn new(severity: Severity, applicability: Applicability, value: Option<RuleValue>) -> Self {
        Self {
            severity,
            applicability,
            value,
        }
    }

    /// Validate a raw `[severity, applicability, parameters]` entry.
    pub fn from_entry(rule: &str, entry: &RuleEntry) -> std::result::Result<Self, ConfigError> {
        let mut items = entry.0.iter();

        let severity = match items.next() {
            Some(RuleValue::Number(code)) => {
                Severity::from_code(*code).ok_or_else(|| ConfigError::InvalidSeverity {
                    rule: rule.to_string(),
                    code: code.to_string(),
                })?
            }
            Some(other) => {
                return Err(ConfigError::InvalidSeverity {
                    rule: rule.to_string(),
                    code: other.to_string(),
                })
            }
            None => {
                return Err(ConfigError::InvalidValue {
                    key: rule.to_string(),
                    message: "empty rule declaration".to_string(),
                })
            }
        };

        let applicability = match items.next() {
            Some(RuleValue::Text(text)) => {
                text.parse::<Applicability>()
                    .map_err(|_| ConfigError::InvalidApplicability {
                        rule: rule.to_string(),
                        value: text.clone(),
                    })?
            }
            Some(other) => {
                return Err(ConfigError::InvalidApplicability {
                    rule: rule.to_string(),
                    value: other.to_string(),
                })
            }
            None => Applicability::Always,
        };

        let value = items.next().cloned();

        if items.next().is_some() {
            return Err(ConfigError::InvalidValue {
                key: rule.to_string(),
                message: format!("expected at most 3 items, got {}", entry.0.len()),
            });
        }

        Ok(Self::new(severity, applicability, value))
    }

    /// Convert back to the raw form.
    pub fn to_entry(&self) -> RuleEntry {
        RuleEntry::new(self.severity, self.applicability, self.value.clone())
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    name: String,
    declaration: RuleDeclaration,
    // None for disabled rules
    rule: Option<Arc<dyn Rule>>,
}

/// A validated set of rules, ordered by rule name.
///
/// Built once per run and never mutated afterwards; cloning shares the
/// compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile raw declarations.
    pub fn compile(
        entries: &BTreeMap<String, RuleEntry>,
    ) -> std::result::Result<Self, ConfigError> {
        let declarations = entries
            .iter()
            .map(|(name, entry)| {
                RuleDeclaration::from_entry(name, entry).map(|d| (name.clone(), d))
            })
            .collect::<std::result::Result<Vec<_>, ConfigError>>()?;

        Self::from_declarations(declarations)
    }

    /// Compile typed declarations. A later declaration replaces an earlier
    /// one with the same name.
    pub fn from_declarations<I, S>(declarations: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, RuleDeclaration)>,
        S: Into<String>,
    {
        let mut by_name: BTreeMap<String, RuleDeclaration> = BTreeMap::new();
        for (name, declaration) in declarations {
            by_name.insert(name.into(), declaration);
        }

        let mut rules = Vec::with_capacity(by_name.len());
        for (name, declaration) in by_name {
            if !is_known_rule(&name) {
                return Err(ConfigError::UnknownRule { rule: name });
            }

            let rule = if declaration.severity == Severity::Disabled {
                None
            } else {
                Some(build_rule(&name, declaration.value.as_ref())?)
            };

            tracing::debug!(
                "Compiled rule {} ({}, {})",
                name,
                declaration.severity,
                declaration.applicability
            );

            rules.push(CompiledRule {
                name,
                declaration,
                rule,
            });
        }

        Ok(Self { rules })
    }

    /// Resolve presets and compile the rules of a configuration.
    pub fn from_config(config: &LintConfig) -> Result<Self> {
        let resolved = resolve_config(config.clone())?;
        Ok(Self::compile(&resolved.rules)?)
    }

    /// Number of declared rules, disabled ones included.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get a rule's declaration.
    pub fn get(&self, name: &str) -> Option<&RuleDeclaration> {
        self.rules
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.declaration)
    }

    /// Declared rule names, in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Rules that are not disabled, with their severity and applicability.
    pub fn active(&self) -> impl Iterator<Item = (&Arc<dyn Rule>, Severity, Applicability)> {
        self.rules.iter().filter_map(|r| {
            r.rule
                .as_ref()
                .map(|rule| (rule, r.declaration.severity, r.declaration.applicability))
        })
    }

    /// The declarations in raw form.
    pub fn to_entries(&self) -> BTreeMap<String, RuleEntry> {
        self.rules
            .iter()
            .map(|r| (r.name.clone(), r.declaration.to_entry()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::error::LintError;

    fn entry(items: Vec<RuleValue>) -> RuleEntry {
        RuleEntry(items)
    }

    #[test]
    fn test_default_rule_set() {
        let rules = RuleSet::from_config(&LintConfig::default()).unwrap();
        assert_eq!(
            rules.names().collect::<Vec<_>>(),
            vec!["subject-case", "subject-max-length", "type-enum"]
        );
        assert_eq!(rules.active().count(), 3);
        assert_eq!(
            rules.get("subject-max-length").unwrap().value,
            Some(RuleValue::Number(50))
        );
    }

    #[test]
    fn test_disabled_rule_needs_no_parameters() {
        let config = parse_config(
            r#"
[rules]
"subject-max-length" = [0]
"#,
        )
        .unwrap();
        let rules = RuleSet::from_config(&config).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.active().count(), 0);
    }

    #[test]
    fn test_unknown_severity() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "type-enum".to_string(),
            entry(vec![RuleValue::Number(3), RuleValue::Text("always".into())]),
        );
        assert!(matches!(
            RuleSet::compile(&entries),
            Err(ConfigError::InvalidSeverity { .. })
        ));
    }

    #[test]
    fn test_non_numeric_severity() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "type-enum".to_string(),
            entry(vec![RuleValue::Text("error".into())]),
        );
        assert!(matches!(
            RuleSet::compile(&entries),
            Err(ConfigError::InvalidSeverity { .. })
        ));
    }

    #[test]
    fn test_invalid_applicability() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "subject-max-length".to_string(),
            entry(vec![
                RuleValue::Number(2),
                RuleValue::Text("sometimes".into()),
                RuleValue::Number(50),
            ]),
        );
        assert!(matches!(
            RuleSet::compile(&entries),
            Err(ConfigError::InvalidApplicability { .. })
        ));
    }

    #[test]
    fn test_missing_parameters() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "subject-max-length".to_string(),
            entry(vec![RuleValue::Number(2), RuleValue::Text("always".into())]),
        );
        assert!(matches!(
            RuleSet::compile(&entries),
            Err(ConfigError::MissingParameters { .. })
        ));
    }

    #[test]
    fn test_unknown_rule() {
        let mut entries = BTreeMap::new();
        entries.insert("body-emoji".to_string(), RuleEntry::disabled());
        assert!(matches!(
            RuleSet::compile(&entries),
            Err(ConfigError::UnknownRule { .. })
        ));
    }

    #[test]
    fn test_too_many_items() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "subject-max-length".to_string(),
            entry(vec![
                RuleValue::Number(2),
                RuleValue::Text("always".into()),
                RuleValue::Number(50),
                RuleValue::Number(60),
            ]),
        );
        assert!(matches!(
            RuleSet::compile(&entries),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_applicability_defaults_to_always() {
        let declaration =
            RuleDeclaration::from_entry("type-empty", &entry(vec![RuleValue::Number(1)])).unwrap();
        assert_eq!(declaration.applicability, Applicability::Always);
        assert_eq!(declaration.severity, Severity::Warning);
    }

    #[test]
    fn test_later_declaration_wins() {
        let rules = RuleSet::from_declarations([
            (
                "subject-max-length",
                RuleDeclaration::new(
                    Severity::Error,
                    Applicability::Always,
                    Some(RuleValue::Number(50)),
                ),
            ),
            (
                "subject-max-length",
                RuleDeclaration::new(
                    Severity::Warning,
                    Applicability::Always,
                    Some(RuleValue::Number(72)),
                ),
            ),
        ])
        .unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get("subject-max-length").unwrap().severity, Severity::Warning);
    }

    #[test]
    fn test_from_config_with_bad_preset() {
        let mut config = LintConfig::empty();
        config.extends.push("missing".to_string());
        assert!(matches!(
            RuleSet::from_config(&config),
            Err(LintError::Config(ConfigError::UnknownPreset { .. }))
        ));
    }

    #[test]
    fn test_to_entries_round_trips_declarations() {
        let config = LintConfig::default();
        let rules = RuleSet::from_config(&config).unwrap();
        assert_eq!(rules.to_entries(), config.rules);
    }
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Letter-case conventions used by the `*-case` rules.

use std::fmt;
use std::str::FromStr;

/// A letter-case convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Lower,
    Upper,
    Camel,
    Kebab,
    Pascal,
    Sentence,
    Snake,
    Start,
}

impl Case {
    /// Get the configuration name of the case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Case::Lower => "lower-case",
            Case::Upper => "upper-case",
            Case::Camel => "camel-case",
            Case::Kebab => "kebab-case",
            Case::Pascal => "pascal-case",
            Case::Sentence => "sentence-case",
            Case::Snake => "snake-case",
            Case::Start => "start-case",
        }
    }

    /// Get all cases.
    pub fn all() -> &'static [Case] {
        &[
            Case::Lower,
            Case::Upper,
            Case::Camel,
            Case::Kebab,
            Case::Pascal,
            Case::Sentence,
            Case::Snake,
            Case::Start,
        ]
    }

    /// Whether `text` is written in this case.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Case::Lower => !text.chars().any(char::is_uppercase),
            Case::Upper => !text.chars().any(char::is_lowercase),
            Case::Camel => {
                !has_separator(text) && !first_alphabetic(text).is_some_and(char::is_uppercase)
            }
            Case::Pascal => {
                !has_separator(text) && first_alphabetic(text).is_some_and(char::is_uppercase)
            }
            Case::Kebab => text
                .chars()
                .all(|c| !c.is_uppercase() && !c.is_whitespace() && c != '_'),
            Case::Snake => text
                .chars()
                .all(|c| !c.is_uppercase() && !c.is_whitespace() && c != '-'),
            Case::Sentence => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => {
                        first.is_uppercase() && !chars.any(char::is_uppercase)
                    }
                    None => true,
                }
            }
            Case::Start => text
                .split_whitespace()
                .all(|word| !first_alphabetic(word).is_some_and(char::is_lowercase)),
        }
    }
}

fn has_separator(text: &str) -> bool {
    text.chars().any(|c| c.is_whitespace() || c == '-' || c == '_')
}

fn first_alphabetic(text: &str) -> Option<char> {
    text.chars().find(|c| c.is_alphabetic())
}

impl FromStr for Case {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Case::all()
            .iter()
            .copied()
            .find(|case| case.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

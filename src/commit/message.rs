// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::error::{CommitError, LintError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches the first line of a footer trailer (`Token: value`, `Token #value`).
    static ref FOOTER_REGEX: Regex =
        Regex::new(r"^(?:BREAKING CHANGE|BREAKING-CHANGE|[\w-]+)(?::\s|\s#)").unwrap();
}

/// Git's comment character in commit templates.
const COMMENT_CHAR: char = '#';

/// A commit message decomposed into its parts.
///
/// Parsing is lenient: any non-empty text produces a message, and missing
/// header fields are left as `None` for the rules to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// The message with comment lines stripped.
    pub raw: String,
    /// First line.
    pub header: String,
    /// Token before `(` or `:`.
    pub commit_type: Option<String>,
    /// Text in parentheses after the type.
    pub scope: Option<String>,
    /// Remainder after the first colon, trimmed.
    pub subject: Option<String>,
    /// Lines between the header and the footer.
    pub body: Option<String>,
    /// Trailing block of `Token: value` lines.
    pub footer: Option<String>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    /// Zero-based line index where the footer starts.
    pub footer_line: Option<usize>,
}

impl CommitMessage {
    /// Parse a commit message from a string.
    pub fn parse(message: &str) -> Result<Self> {
        let raw = strip_comments(message);

        if raw.is_empty() {
            return Err(LintError::Commit(CommitError::EmptyMessage));
        }

        let lines: Vec<&str> = raw.lines().collect();
        let header = lines[0].trim_end().to_string();

        let (commit_type, scope, subject, header_breaking) = parse_header(&header);

        let footer_line = find_footer(&lines);

        let body_end = footer_line.unwrap_or(lines.len());
        let body = join_block(&lines[1.min(body_end)..body_end]);
        let footer = footer_line.and_then(|idx| join_block(&lines[idx..]));

        let is_breaking = header_breaking
            || footer
                .as_ref()
                .map(|f| f.contains("BREAKING CHANGE") || f.contains("BREAKING-CHANGE"))
                .unwrap_or(false);

        Ok(Self {
            raw,
            header,
            commit_type,
            scope,
            subject,
            body,
            footer,
            is_breaking,
            footer_line,
        })
    }

    /// All lines of the message, header included.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.lines()
    }

    /// Body lines, if there is a body.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.body.iter().flat_map(|b| b.lines())
    }

    /// Number of characters in the subject (zero when absent).
    pub fn subject_len(&self) -> usize {
        self.subject
            .as_deref()
            .map(|s| s.chars().count())
            .unwrap_or(0)
    }

    /// Number of characters in the header.
    pub fn header_len(&self) -> usize {
        self.header.chars().count()
    }
}

/// Drop comment lines and surrounding blank lines.
fn strip_comments(message: &str) -> String {
    message
        .lines()
        .filter(|line| !line.starts_with(COMMENT_CHAR))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Split a header into type, scope, subject and the `!` marker.
fn parse_header(header: &str) -> (Option<String>, Option<String>, Option<String>, bool) {
    let Some(colon) = header.find(':') else {
        return (None, None, None, false);
    };

    let prefix = &header[..colon];
    let subject = non_empty(header[colon + 1..].trim());

    let (prefix, breaking) = match prefix.trim_end().strip_suffix('!') {
        Some(stripped) => (stripped, true),
        None => (prefix, false),
    };

    let (type_part, scope) = match prefix.find('(') {
        Some(open) => {
            let rest = &prefix[open + 1..];
            let scope = match rest.find(')') {
                Some(close) => &rest[..close],
                None => rest,
            };
            (&prefix[..open], non_empty(scope.trim()))
        }
        None => (prefix, None),
    };

    (non_empty(type_part.trim()), scope, subject, breaking)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Index of the first footer line.
///
/// Only the last paragraph can be a footer (everything after the header when
/// there is no blank line), and only when it starts with a trailer and every
/// other line is a trailer or an indented continuation.
fn find_footer(lines: &[&str]) -> Option<usize> {
    let start = lines
        .iter()
        .rposition(|line| line.trim().is_empty())
        .map_or(1, |idx| idx + 1);
    let block = lines.get(start..)?;

    if !FOOTER_REGEX.is_match(block.first()?) {
        return None;
    }

    block
        .iter()
        .all(|line| FOOTER_REGEX.is_match(line) || line.starts_with(char::is_whitespace))
        .then_some(start)
}

/// Join lines into a block, trimming blank lines at both ends.
fn join_block(lines: &[&str]) -> Option<String> {
    non_empty(lines.join("\n").trim_matches('\n').trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let msg = CommitMessage::parse("feat: add login flow").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
        assert_eq!(msg.scope, None);
        assert_eq!(msg.subject.as_deref(), Some("add login flow"));
        assert!(msg.body.is_none());
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_parse_with_scope() {
        let msg = CommitMessage::parse("fix(core): handle empty input").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("fix"));
        assert_eq!(msg.scope.as_deref(), Some("core"));
        assert_eq!(msg.subject.as_deref(), Some("handle empty input"));
    }

    #[test]
    fn test_parse_keeps_type_case() {
        let msg = CommitMessage::parse("Fix: Something Broke").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("Fix"));
        assert_eq!(msg.subject.as_deref(), Some("Something Broke"));
    }

    #[test]
    fn test_parse_unknown_type_is_kept() {
        let msg = CommitMessage::parse("wip: half done").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("wip"));
    }

    #[test]
    fn test_parse_breaking_marker() {
        let msg = CommitMessage::parse("feat(api)!: drop v1 endpoints").unwrap();
        assert!(msg.is_breaking);
        assert_eq!(msg.commit_type.as_deref(), Some("feat"));
        assert_eq!(msg.scope.as_deref(), Some("api"));
    }

    #[test]
    fn test_parse_no_colon() {
        let msg = CommitMessage::parse("just some text").unwrap();
        assert!(msg.commit_type.is_none());
        assert!(msg.subject.is_none());
        assert_eq!(msg.header, "just some text");
    }

    #[test]
    fn test_parse_empty_subject() {
        let msg = CommitMessage::parse("chore:   ").unwrap();
        assert_eq!(msg.commit_type.as_deref(), Some("chore"));
        assert!(msg.subject.is_none());
    }

    #[test]
    fn test_parse_body_and_footer() {
        let text = "fix: stop crash\n\nThe parser read past the end.\nNow it does not.\n\nRefs #42\nBREAKING CHANGE: config format changed";
        let msg = CommitMessage::parse(text).unwrap();
        assert_eq!(
            msg.body.as_deref(),
            Some("The parser read past the end.\nNow it does not.")
        );
        assert_eq!(msg.footer_line, Some(5));
        assert!(msg.footer.as_deref().unwrap().starts_with("Refs #42"));
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_parse_token_line_inside_body() {
        let text = "fix: handle empty input\n\nThe parser now checks length first.\nNote: the old path is kept for now.\nissue #42 was odd";
        let msg = CommitMessage::parse(text).unwrap();
        assert!(msg.footer.is_none());
        assert_eq!(msg.footer_line, None);
        assert_eq!(msg.body_lines().count(), 3);
    }

    #[test]
    fn test_parse_mixed_last_paragraph_is_body() {
        let text = "feat: add cache\n\nFirst paragraph.\n\nReviewed-by: Sam\nplain prose line";
        let msg = CommitMessage::parse(text).unwrap();
        assert!(msg.footer.is_none());
        assert!(msg.body.as_deref().unwrap().ends_with("plain prose line"));
    }

    #[test]
    fn test_parse_footer_continuation() {
        let text = "feat!: new config\n\nBody text.\n\nBREAKING CHANGE: keys renamed\n  see the upgrade notes\nRefs: #7";
        let msg = CommitMessage::parse(text).unwrap();
        assert_eq!(msg.footer_line, Some(4));
        assert_eq!(msg.body.as_deref(), Some("Body text."));
        assert!(msg.footer.as_deref().unwrap().ends_with("Refs: #7"));
    }

    #[test]
    fn test_parse_footer_right_after_header() {
        let msg = CommitMessage::parse("fix: x\nRefs: #1").unwrap();
        assert_eq!(msg.footer_line, Some(1));
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_parse_strips_comments() {
        let text = "docs: fix typo\n# Please enter the commit message\n# Lines starting with '#' will be ignored";
        let msg = CommitMessage::parse(text).unwrap();
        assert_eq!(msg.raw, "docs: fix typo");
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            CommitMessage::parse("  \n\n"),
            Err(LintError::Commit(CommitError::EmptyMessage))
        ));
        assert!(CommitMessage::parse("# only a comment").is_err());
    }

    #[test]
    fn test_subject_len_counts_chars() {
        let msg = CommitMessage::parse("docs: überarbeitet").unwrap();
        assert_eq!(msg.subject_len(), 12);
    }
}

//! Malformed-markup conditions and engine errors.

use std::fmt;

use strum_macros::Display;
use thiserror::Error;

use crate::layout::LayoutPolicy;

/// The kinds of malformed markup the engine detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Condition {
    /// A tag with no `>` before the end of input, or a style tag still
    /// open when the input ends. Not recoverable mid-scan.
    UnterminatedTag,
    /// A tag name outside the supported vocabulary, or `<html>` anywhere
    /// but first.
    UnknownTag,
    /// `</b>` or `</i>` without the matching opening tag.
    UnmatchedClose,
    /// A `<font>` tag whose color attribute is missing or not valid hex.
    BadColorAttribute,
    /// A `!key` color the theme cannot resolve.
    UnresolvedThemeColor,
    /// `&#…;` whose body is not a decimal code point.
    BadNumericEntity,
}

impl Condition {
    /// Whether the scan can continue after logging this condition.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        !matches!(self, Self::UnterminatedTag)
    }
}

/// A located malformed-markup report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub condition: Condition,
    /// Human-readable summary; also the deduplication key.
    pub message: String,
    /// Char offset into the input the report points at.
    pub position: usize,
    /// Summary, the input, and a caret under `position`, on three lines.
    pub detail: String,
}

impl Diagnostic {
    /// Build a report for `text`, pointing at char offset `position`.
    #[must_use]
    pub fn new(condition: Condition, message: impl Into<String>, text: &str, position: usize) -> Self {
        let message = message.into();
        let shown: String = text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        let caret = position.min(shown.chars().count());
        let detail = format!("{message}\n  {shown}\n  {}^", " ".repeat(caret));
        Self {
            condition,
            message,
            position,
            detail,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Errors returned by the render entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Malformed markup in strict mode.
    #[error("malformed markup: {0}")]
    Malformed(Diagnostic),
    /// A single-line entry point was asked for multi-line layout.
    #[error("layout policy {0} is only available through the multi-line entry point")]
    UnsupportedPolicy(LayoutPolicy),
}

impl MarkupError {
    /// The diagnostic, for malformed-markup errors.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Malformed(diagnostic) => Some(diagnostic),
            Self::UnsupportedPolicy(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_caret_position() {
        let diagnostic = Diagnostic::new(Condition::UnknownTag, "Unsupported tag <q>", "ab<q>cd", 2);
        let lines: Vec<&str> = diagnostic.detail.lines().collect();
        assert_eq!(lines[0], "Unsupported tag <q>");
        assert_eq!(lines[1], "  ab<q>cd");
        assert_eq!(lines[2], "    ^");
    }

    #[test]
    fn test_diagnostic_flattens_newlines() {
        let diagnostic = Diagnostic::new(Condition::UnknownTag, "x", "a\nb", 1);
        assert_eq!(diagnostic.detail.lines().count(), 3);
    }

    #[test]
    fn test_error_display_includes_caret() {
        let err = MarkupError::Malformed(Diagnostic::new(
            Condition::UnterminatedTag,
            "Matching '>' not found",
            "<b",
            0,
        ));
        let text = err.to_string();
        assert!(text.contains("Matching '>' not found"));
        assert!(text.ends_with('^'));
        assert!(err.diagnostic().is_some());
    }

    #[test]
    fn test_recoverability() {
        assert!(!Condition::UnterminatedTag.is_recoverable());
        assert!(Condition::UnknownTag.is_recoverable());
        assert!(Condition::BadNumericEntity.is_recoverable());
    }
}

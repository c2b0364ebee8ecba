//! Diagnostic types for linting results

use crate::ast::Span;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - convention violation that fails the run
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Source code location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-based, 0 when the tree carries no line info)
    pub line: usize,
    /// Column number (1-based, 0 when the tree carries no line info)
    pub column: usize,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            start: 0,
            end: 0,
        }
    }

    /// Location of a node's span in `file`
    pub fn from_span(file: PathBuf, span: &Span) -> Self {
        Self {
            file,
            line: span.line(),
            column: span.column(),
            start: span.start,
            end: span.end,
        }
    }

    /// Length of the highlighted region
    pub fn length(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// A lint diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID that triggered this diagnostic
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Source location
    pub location: Location,
    /// Help text (usually rule description)
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(rule_id: &str, severity: Severity, message: &str, location: Location) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            location,
            help: None,
        }
    }

    /// Add help text
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Position, SourceLocation};

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert_eq!(Severity::default(), Severity::Warning);
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_diagnostic_creation() {
        let loc = Location::new(PathBuf::from("src/routes/index.tsx"), 3, 1);
        let diag = Diagnostic::new("no-direct-scss-imports", Severity::Error, "msg", loc)
            .with_help("Load styles through useStyles$");

        assert_eq!(diag.rule_id, "no-direct-scss-imports");
        assert!(diag.is_error());
        assert!(!diag.is_warning());
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_location_from_span() {
        let span = Span {
            start: 10,
            end: 32,
            loc: Some(SourceLocation {
                start: Position { line: 2, column: 4 },
                end: Position { line: 2, column: 26 },
            }),
        };
        let loc = Location::from_span(PathBuf::from("a.tsx"), &span);
        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 5);
        assert_eq!(loc.length(), 22);
    }

    #[test]
    fn test_location_without_line_info() {
        let loc = Location::from_span(PathBuf::from("a.tsx"), &Span::default());
        assert_eq!((loc.line, loc.column, loc.length()), (0, 0, 0));
    }
}

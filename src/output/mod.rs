//! Output formatters for lint results

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::diagnostic::Diagnostic;
use crate::linter::LintResult;

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire lint result
    fn format(&self, result: &LintResult) -> String;

    /// Format a single diagnostic
    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String;
}

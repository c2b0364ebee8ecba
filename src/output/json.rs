//! JSON output formatter

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::linter::LintResult;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    rule_id: &'a str,
    severity: String,
    message: &'a str,
    file: String,
    line: usize,
    column: usize,
    start: usize,
    end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<&'a str>,
}

impl<'a> From<&'a Diagnostic> for JsonDiagnostic<'a> {
    fn from(d: &'a Diagnostic) -> Self {
        Self {
            rule_id: &d.rule_id,
            severity: d.severity.to_string(),
            message: &d.message,
            file: d.location.file.display().to_string(),
            line: d.location.line,
            column: d.location.column,
            start: d.location.start,
            end: d.location.end,
            help: d.help.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    files_with_errors: usize,
    files_with_warnings: usize,
    error_count: usize,
    warning_count: usize,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        let output = JsonOutput {
            diagnostics: result.diagnostics.iter().map(JsonDiagnostic::from).collect(),
            summary: JsonSummary {
                files_processed: result.files_processed,
                files_with_errors: result.files_with_errors,
                files_with_warnings: result.files_with_warnings,
                error_count: result.error_count,
                warning_count: result.warning_count,
                duration_ms: result.duration.as_millis(),
            },
        };

        self.render(&output)
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        self.render(&JsonDiagnostic::from(diagnostic))
    }
}

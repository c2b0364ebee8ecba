//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::linter::LintResult;
use colored::*;
use std::collections::BTreeMap;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show help text
    pub show_help: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_help: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
        }
    }

    fn format_location(&self, diag: &Diagnostic) -> String {
        format!(
            "{}:{}:{}",
            diag.location.file.display(),
            diag.location.line,
            diag.location.column
        )
    }

    fn paint(&self, s: String, color: Color) -> String {
        if self.colored {
            s.color(color).to_string()
        } else {
            s
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        // Group diagnostics by file
        let mut by_file: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for diag in &result.diagnostics {
            by_file.entry(&diag.location.file).or_default().push(diag);
        }

        for (file, diagnostics) in &by_file {
            if self.colored {
                output.push_str(&format!("{}\n", file.display().to_string().underline()));
            } else {
                output.push_str(&format!("{}\n", file.display()));
            }

            for diag in diagnostics {
                output.push_str(&self.format_diagnostic(diag));
            }
            output.push('\n');
        }

        if self.show_stats {
            output.push_str(&plural(result.files_processed, "file"));
            output.push_str(" processed");

            let mut counts = Vec::new();
            if result.error_count > 0 {
                counts.push(self.paint(plural(result.error_count, "error"), Color::Red));
            }
            if result.warning_count > 0 {
                counts.push(self.paint(plural(result.warning_count, "warning"), Color::Yellow));
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        let mut output = format!(
            "{}: {}[{}]: {}\n",
            self.format_location(diag),
            self.severity_str(diag.severity),
            self.paint(diag.rule_id.clone(), Color::Cyan),
            diag.message
        );

        if self.show_help {
            if let Some(help) = &diag.help {
                output.push_str(&format!(
                    "   {} help: {}\n",
                    self.paint("=".to_string(), Color::Blue),
                    help
                ));
            }
        }

        output
    }
}

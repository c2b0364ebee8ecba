//! Reference driver: runs the configured rules over ESTree trees

use crate::ast::Node;
use crate::config::{ConfigError, LinterConfig};
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::rule::{Rule, RuleContext, RuleError, Visitor};
use crate::rules;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Rule id used for files that could not be loaded
pub const LOAD_ERROR: &str = "load-error";

/// Error linting a single file
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ESTree JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Rule '{rule}' failed: {source}")]
    Rule {
        rule: String,
        #[source]
        source: RuleError,
    },
}

/// Result of linting operation
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,

    /// Files processed
    pub files_processed: usize,

    /// Files with errors
    pub files_with_errors: usize,

    /// Files with warnings
    pub files_with_warnings: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Result for one file
    pub fn from_file(diagnostics: Vec<Diagnostic>) -> Self {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };

        for diag in &diagnostics {
            match diag.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
            }
        }
        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }

        result.diagnostics = diagnostics;
        result
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
    }
}

/// An enabled rule with its resolved setting
struct ActiveRule {
    rule: &'static dyn Rule,
    severity: Severity,
    options: serde_json::Value,
}

/// Runs the enabled rules over program trees
pub struct Linter {
    rules: Vec<ActiveRule>,
    parallel: bool,
    jobs: usize,
}

impl Linter {
    /// Create a linter, rejecting unknown rule names
    pub fn new(config: LinterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut active = Vec::new();
        for (name, setting) in config.enabled_rules() {
            let rule = rules::find_rule(name)
                .ok_or_else(|| ConfigError::UnknownRule(name.to_string()))?;
            let Some(severity) = setting.level.severity() else {
                continue;
            };
            active.push(ActiveRule {
                rule,
                severity,
                options: setting.options.clone(),
            });
        }

        Ok(Self {
            rules: active,
            parallel: config.parallel,
            jobs: config.jobs,
        })
    }

    /// Number of enabled rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the enabled rules
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|active| active.rule.name())
    }

    /// Lint one program tree as the file at `path`
    pub fn lint_program(&self, path: &Path, program: &Node) -> Result<Vec<Diagnostic>, LintError> {
        let mut diagnostics = Vec::new();

        for active in &self.rules {
            let name = active.rule.name();
            let mut ctx = RuleContext::new(name, active.severity, path, &active.options, program)
                .with_help(active.rule.meta().description);

            let visitor = active.rule.create(&ctx).map_err(|source| LintError::Rule {
                rule: name.to_string(),
                source,
            })?;
            if visitor.is_empty() {
                continue;
            }
            log::debug!("{}: visiting {:?} in {}", name, visitor.node_types(), path.display());

            visitor.enter_file(program, &mut ctx);
            walk(program, &visitor, &mut ctx);
            diagnostics.extend(ctx.take_diagnostics());
        }

        diagnostics.sort_by_key(|d| (d.location.line, d.location.column, d.location.start));
        Ok(diagnostics)
    }

    /// Lint an ESTree JSON dump; `index.tsx.json` is reported as `index.tsx`
    pub fn lint_file(&self, path: &Path) -> Result<Vec<Diagnostic>, LintError> {
        let content = std::fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let program = Node::from_json(&content).map_err(|source| LintError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        self.lint_program(&source_path(path), &program)
    }

    /// Lint multiple files
    pub fn lint_files(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let results: Vec<LintResult> = if self.parallel && files.len() > 1 {
            let jobs = if self.jobs > 0 {
                self.jobs
            } else {
                num_cpus::get()
            };
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(|f| self.lint_one(f)).collect()),
                Err(e) => {
                    log::warn!("Failed to build thread pool, linting serially: {}", e);
                    files.iter().map(|f| self.lint_one(f)).collect()
                }
            }
        } else {
            files.iter().map(|f| self.lint_one(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        combined
    }

    fn lint_one(&self, path: &Path) -> LintResult {
        match self.lint_file(path) {
            Ok(diagnostics) => LintResult::from_file(diagnostics),
            Err(e) => {
                log::warn!("{}", e);
                let rule_id = match &e {
                    LintError::Rule { rule, .. } => rule.as_str(),
                    _ => LOAD_ERROR,
                };
                let diagnostic = Diagnostic::new(
                    rule_id,
                    Severity::Error,
                    &e.to_string(),
                    Location::new(source_path(path), 0, 0),
                );
                LintResult::from_file(vec![diagnostic])
            }
        }
    }
}

/// Path of the source file a dump was produced from
pub fn source_path(dump: &Path) -> PathBuf {
    match dump.to_str().and_then(|s| s.strip_suffix(".json")) {
        Some(stripped) if !stripped.is_empty() => PathBuf::from(stripped),
        _ => dump.to_path_buf(),
    }
}

/// Depth-first, pre-order
fn walk(node: &Node, visitor: &Visitor, ctx: &mut RuleContext<'_>) {
    visitor.visit(node, ctx);
    for child in node.children() {
        walk(child, visitor, ctx);
    }
}

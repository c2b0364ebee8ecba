//! Rule contract: metadata, per-file context and visitor tables
//!
//! A rule is a stateless object. For every file the host calls
//! [`Rule::create`] once, receiving a [`Visitor`] that maps node types to
//! callbacks. The host then walks the tree and invokes the callbacks, which
//! report violations through the [`RuleContext`].

use crate::ast::{Node, NodeType};
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::exclusion::PatternError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Rule category for grouping related rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Code that is definitely wrong
    Correctness,
    /// Code that is likely wrong or suspicious
    Suspicious,
    /// Idiomatic and consistent style rules
    #[default]
    Style,
    /// Rules that ban specific patterns or features
    Restriction,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Correctness => write!(f, "correctness"),
            RuleCategory::Suspicious => write!(f, "suspicious"),
            RuleCategory::Style => write!(f, "style"),
            RuleCategory::Restriction => write!(f, "restriction"),
        }
    }
}

impl std::str::FromStr for RuleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "correctness" => Ok(RuleCategory::Correctness),
            "suspicious" => Ok(RuleCategory::Suspicious),
            "style" => Ok(RuleCategory::Style),
            "restriction" => Ok(RuleCategory::Restriction),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Static description of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    /// Rule name as used in configuration (e.g., "require-document-head")
    pub name: &'static str,
    /// One-line description, used as diagnostic help text
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether the recommended preset enables this rule
    pub recommended: bool,
    /// Message reported on violation
    pub message: &'static str,
}

/// Error creating a rule's visitor for a file
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Invalid options for rule '{rule}': {source}")]
    Options {
        rule: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// A lint rule
pub trait Rule: Send + Sync {
    /// Rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Rule name
    fn name(&self) -> &'static str {
        self.meta().name
    }

    /// Build the visitor table for one file
    fn create(&self, ctx: &RuleContext<'_>) -> Result<Visitor, RuleError>;
}

/// Callback invoked for a visited node
pub type Handler = Box<dyn Fn(&Node, &mut RuleContext<'_>)>;

/// Per-file table of node callbacks for one rule
#[derive(Default)]
pub struct Visitor {
    on_file_entry: Option<Handler>,
    handlers: HashMap<NodeType, Vec<Handler>>,
}

impl Visitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback run once with the program root before the walk
    pub fn on_file_entry<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Node, &mut RuleContext<'_>) + 'static,
    {
        self.on_file_entry = Some(Box::new(handler));
        self
    }

    /// Register a callback for every node of `node_type`
    pub fn on<F>(mut self, node_type: NodeType, handler: F) -> Self
    where
        F: Fn(&Node, &mut RuleContext<'_>) + 'static,
    {
        self.handlers
            .entry(node_type)
            .or_default()
            .push(Box::new(handler));
        self
    }

    /// Check whether the visitor reacts to nothing
    pub fn is_empty(&self) -> bool {
        self.on_file_entry.is_none() && self.handlers.is_empty()
    }

    /// Node types with registered callbacks
    pub fn node_types(&self) -> Vec<NodeType> {
        let mut types: Vec<_> = self.handlers.keys().copied().collect();
        types.sort();
        types
    }

    /// Run the file entry callback, if any
    pub fn enter_file(&self, program: &Node, ctx: &mut RuleContext<'_>) {
        if let Some(handler) = &self.on_file_entry {
            handler(program, ctx);
        }
    }

    /// Run the callbacks registered for this node's type
    pub fn visit(&self, node: &Node, ctx: &mut RuleContext<'_>) {
        if let Some(handlers) = self.handlers.get(&node.node_type()) {
            for handler in handlers {
                handler(node, ctx);
            }
        }
    }
}

impl fmt::Debug for Visitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor")
            .field("on_file_entry", &self.on_file_entry.is_some())
            .field("node_types", &self.node_types())
            .finish()
    }
}

/// What a rule sees of the file being linted
pub struct RuleContext<'a> {
    rule_id: &'a str,
    severity: Severity,
    help: Option<&'a str>,
    file_path: &'a Path,
    options: &'a serde_json::Value,
    program: &'a Node,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        rule_id: &'a str,
        severity: Severity,
        file_path: &'a Path,
        options: &'a serde_json::Value,
        program: &'a Node,
    ) -> Self {
        Self {
            rule_id,
            severity,
            help: None,
            file_path,
            options,
            program,
            diagnostics: Vec::new(),
        }
    }

    /// Attach help text to every reported diagnostic
    pub fn with_help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn rule_id(&self) -> &str {
        self.rule_id
    }

    /// Path of the file being linted
    pub fn file_path(&self) -> &Path {
        self.file_path
    }

    /// Raw options value (`Null` when none were configured)
    pub fn options_value(&self) -> &serde_json::Value {
        self.options
    }

    /// Decode the options value, falling back to `T::default()` when absent
    pub fn options<T>(&self) -> Result<T, RuleError>
    where
        T: DeserializeOwned + Default,
    {
        if self.options.is_null() {
            return Ok(T::default());
        }
        T::deserialize(self.options).map_err(|source| RuleError::Options {
            rule: self.rule_id.to_string(),
            source,
        })
    }

    /// Root of the tree
    pub fn program(&self) -> &'a Node {
        self.program
    }

    /// Top-level statements of the file
    pub fn body(&self) -> &'a [Node] {
        self.program.body()
    }

    /// Report a violation on `node`
    pub fn report(&mut self, node: &Node, message: &str) {
        let location = Location::from_span(self.file_path.to_path_buf(), &node.span);
        let mut diagnostic = Diagnostic::new(self.rule_id, self.severity, message, location);
        if let Some(help) = self.help {
            diagnostic = diagnostic.with_help(help);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics reported so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Hand the reported diagnostics over to the caller
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

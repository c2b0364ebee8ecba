//! conventions-lint - Qwik project convention rules
//!
//! A small set of lint rules for a Qwik front end, run over ESTree syntax
//! trees:
//!
//! - `no-direct-scss-imports`: stylesheets go through `useStylesScoped$`
//! - `require-document-head`: route files export a `head` function
//! - `require-generic-props`: `component$<Props>(...)` when props are taken
//! - `require-entity-query-conditions`: `entityQuery` filters constrain
//!   `status` and `dental_laboratory`
//!
//! # Architecture
//!
//! ```text
//! CLI -> Linter -> Rule::create -> Visitor -> RuleContext::report -> Diagnostic
//! ```
//!
//! Rules never parse source themselves. The host supplies the tree (the
//! bundled driver reads ESTree JSON dumps), calls [`Rule::create`] once per
//! file and walks the tree, dispatching nodes to the visitor callbacks.

pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod exclusion;
pub mod linter;
pub mod output;
pub mod predicates;
pub mod query_filter;
pub mod rule;
pub mod rules;

// Re-export main types
pub use ast::{Node, NodeKind, NodeType};
pub use config::{ConfigError, LinterConfig, RuleLevel, RuleSetting};
pub use diagnostic::{Diagnostic, Location, Severity};
pub use exclusion::{ExclusionFilter, PatternError};
pub use linter::{LintError, LintResult, Linter};
pub use query_filter::ConditionRequirement;
pub use rule::{Rule, RuleCategory, RuleContext, RuleError, RuleMeta, Visitor};
pub use rules::{find_rule, rules};

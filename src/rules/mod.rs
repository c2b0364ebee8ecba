//! Built-in rules and the rule registry

mod no_direct_scss_imports;
mod require_document_head;
mod require_entity_query_conditions;
mod require_generic_props;

pub use no_direct_scss_imports::NoDirectScssImports;
pub use require_document_head::{DocumentHeadOptions, RequireDocumentHead};
pub use require_entity_query_conditions::RequireEntityQueryConditions;
pub use require_generic_props::RequireGenericProps;

use crate::rule::Rule;
use std::collections::BTreeMap;

const BUILTIN_RULES: &[&dyn Rule] = &[
    &NoDirectScssImports,
    &RequireDocumentHead,
    &RequireGenericProps,
    &RequireEntityQueryConditions,
];

/// All built-in rules, keyed by name
pub fn rules() -> BTreeMap<&'static str, &'static dyn Rule> {
    BUILTIN_RULES.iter().map(|rule| (rule.name(), *rule)).collect()
}

/// Look up a built-in rule by name
pub fn find_rule(name: &str) -> Option<&'static dyn Rule> {
    BUILTIN_RULES.iter().copied().find(|rule| rule.name() == name)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers to run a single rule over an ESTree tree built with `json!`

    use crate::ast::Node;
    use crate::config::{LinterConfig, RuleLevel, RuleSetting};
    use crate::diagnostic::Diagnostic;
    use crate::linter::Linter;
    use serde_json::{json, Value};
    use std::path::Path;

    pub fn run_rule(rule: &str, path: &str, options: Value, program: Value) -> Vec<Diagnostic> {
        let mut config = LinterConfig::default();
        config.rules.insert(
            rule.to_string(),
            RuleSetting::with_options(RuleLevel::Error, options),
        );
        let linter = Linter::new(config).unwrap();
        let program = Node::from_value(program).unwrap();
        linter.lint_program(Path::new(path), &program).unwrap()
    }

    pub fn program(body: Vec<Value>) -> Value {
        json!({ "type": "Program", "sourceType": "module", "body": body })
    }

    pub fn ident(name: &str) -> Value {
        json!({ "type": "Identifier", "name": name })
    }

    pub fn lit(value: &str) -> Value {
        json!({ "type": "Literal", "value": value })
    }

    pub fn prop(key: &str, value: Value) -> Value {
        json!({ "type": "Property", "key": ident(key), "value": value, "computed": false })
    }

    pub fn obj(properties: Vec<Value>) -> Value {
        json!({ "type": "ObjectExpression", "properties": properties })
    }

    pub fn arr(elements: Vec<Value>) -> Value {
        json!({ "type": "ArrayExpression", "elements": elements })
    }

    pub fn call(callee: Value, arguments: Vec<Value>) -> Value {
        json!({ "type": "CallExpression", "callee": callee, "arguments": arguments })
    }

    pub fn arrow(params: Vec<Value>) -> Value {
        json!({
            "type": "ArrowFunctionExpression",
            "params": params,
            "body": { "type": "Literal", "value": null }
        })
    }

    pub fn expr_stmt(expression: Value) -> Value {
        json!({ "type": "ExpressionStatement", "expression": expression })
    }

    pub fn const_decl(id: Value, init: Value) -> Value {
        json!({
            "type": "VariableDeclaration",
            "kind": "const",
            "declarations": [{ "type": "VariableDeclarator", "id": id, "init": init }]
        })
    }

    pub fn export(declaration: Value) -> Value {
        json!({
            "type": "ExportNamedDeclaration",
            "declaration": declaration,
            "specifiers": []
        })
    }
}

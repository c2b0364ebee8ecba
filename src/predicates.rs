//! Node shape predicates shared by the rules
//!
//! All checks are structural and total: a shape mismatch or a missing piece
//! yields `false` / `None`, never a panic.

use crate::ast::{Node, NodeKind};

/// Check that `node` is a non-computed property whose key is the identifier `name`
pub fn is_named_property(node: &Node, name: &str) -> bool {
    match &node.kind {
        NodeKind::Property { key, computed, .. } => {
            !computed && key.as_identifier() == Some(name)
        }
        _ => false,
    }
}

/// Check that `node` is a string literal equal to `value`
pub fn literal_equals(node: &Node, value: &str) -> bool {
    node.as_literal()
        .and_then(|scalar| scalar.as_str())
        .is_some_and(|s| s == value)
}

/// Value of the first property called `name` in an object literal or object pattern
pub fn property_value<'a>(object: &'a Node, name: &str) -> Option<&'a Node> {
    let properties = match &object.kind {
        NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
            properties
        }
        _ => return None,
    };

    properties
        .iter()
        .find(|p| is_named_property(p, name))
        .and_then(|p| match &p.kind {
            NodeKind::Property { value, .. } => Some(value.as_ref()),
            _ => None,
        })
}

/// Follow a chain of property names through nested object literals
pub fn property_path<'a>(object: &'a Node, path: &[&str]) -> Option<&'a Node> {
    path.iter()
        .try_fold(object, |node, name| property_value(node, name))
}

/// Check for an arrow function or function expression
pub fn is_function(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::ArrowFunctionExpression { .. } | NodeKind::FunctionExpression { .. }
    )
}

/// Parameter list of an arrow function or function expression
pub fn function_params(node: &Node) -> Option<&[Node]> {
    match &node.kind {
        NodeKind::ArrowFunctionExpression { params, .. }
        | NodeKind::FunctionExpression { params, .. } => Some(params),
        _ => None,
    }
}

/// Check that `node` is the identifier `name`
pub fn is_identifier(node: &Node, name: &str) -> bool {
    node.as_identifier() == Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn node(value: Value) -> Node {
        Node::from_value(value).unwrap()
    }

    fn prop(key: &str, value: Value) -> Value {
        json!({
            "type": "Property",
            "key": { "type": "Identifier", "name": key },
            "value": value,
            "computed": false
        })
    }

    fn lit(value: &str) -> Value {
        json!({ "type": "Literal", "value": value })
    }

    #[test]
    fn test_is_named_property() {
        let p = node(prop("field", lit("status")));
        assert!(is_named_property(&p, "field"));
        assert!(!is_named_property(&p, "value"));
    }

    #[test]
    fn test_is_named_property_computed_key() {
        let p = node(json!({
            "type": "Property",
            "key": { "type": "Identifier", "name": "field" },
            "value": { "type": "Literal", "value": "status" },
            "computed": true
        }));
        assert!(!is_named_property(&p, "field"));
    }

    #[test]
    fn test_is_named_property_string_key() {
        // `{ "field": ... }` has a literal key, not an identifier
        let p = node(json!({
            "type": "Property",
            "key": { "type": "Literal", "value": "field" },
            "value": { "type": "Literal", "value": "status" }
        }));
        assert!(!is_named_property(&p, "field"));
    }

    #[test]
    fn test_is_named_property_not_a_property() {
        assert!(!is_named_property(&node(lit("field")), "field"));
    }

    #[test]
    fn test_literal_equals() {
        assert!(literal_equals(&node(lit("AND")), "AND"));
        assert!(!literal_equals(&node(lit("OR")), "AND"));
        assert!(!literal_equals(&node(json!({ "type": "Literal", "value": 1 })), "1"));
        assert!(!literal_equals(
            &node(json!({ "type": "Identifier", "name": "AND" })),
            "AND"
        ));
    }

    #[test]
    fn test_property_path() {
        let obj = node(json!({
            "type": "ObjectExpression",
            "properties": [
                prop("__args", json!({
                    "type": "ObjectExpression",
                    "properties": [prop("filter", json!({ "type": "ObjectExpression", "properties": [] }))]
                }))
            ]
        }));

        let filter = property_path(&obj, &["__args", "filter"]).unwrap();
        assert!(filter.as_object().is_some());
        assert!(property_path(&obj, &["__args", "sort"]).is_none());
        assert!(property_path(&obj, &["filter"]).is_none());
    }

    #[test]
    fn test_property_value_first_match_wins() {
        let obj = node(json!({
            "type": "ObjectExpression",
            "properties": [prop("a", lit("first")), prop("a", lit("second"))]
        }));
        assert!(literal_equals(property_value(&obj, "a").unwrap(), "first"));
    }

    #[test]
    fn test_function_params() {
        let arrow = node(json!({
            "type": "ArrowFunctionExpression",
            "params": [{ "type": "Identifier", "name": "props" }],
            "body": { "type": "Literal", "value": null }
        }));
        assert!(is_function(&arrow));
        assert_eq!(function_params(&arrow).map(|p| p.len()), Some(1));
        assert!(function_params(&node(lit("x"))).is_none());
    }
}

//! Structural validation of entity query filters
//!
//! A filter literal looks like:
//!
//! ```text
//! {
//!   conditions: [{ field: "status", ... }, ...],
//!   groups: [{ conjunction: "AND", conditions: [...] }, ...],
//! }
//! ```
//!
//! It is compliant when one condition set, either the top-level `conditions`
//! or the `conditions` of an `AND` group, names every required field. The
//! fields may be spread over different conditions of that set.

use crate::ast::Node;
use crate::predicates::{literal_equals, property_value};

/// Fields every entity query must filter on
pub const REQUIRED_FIELDS: [&str; 2] = ["status", "dental_laboratory"];

/// Conjunction value that makes a group's conditions count
pub const AND_CONJUNCTION: &str = "AND";

/// The set of fields a filter's condition set must cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRequirement {
    fields: Vec<String>,
}

impl Default for ConditionRequirement {
    fn default() -> Self {
        Self::new(REQUIRED_FIELDS)
    }
}

impl ConditionRequirement {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Decide whether a filter literal satisfies the requirement
    pub fn is_compliant(&self, filter: &Node) -> bool {
        if filter.as_object().is_none() {
            return false;
        }

        if property_value(filter, "conditions")
            .and_then(Node::as_array)
            .is_some_and(|conditions| self.conditions_satisfy(conditions))
        {
            return true;
        }

        let Some(groups) = property_value(filter, "groups").and_then(Node::as_array) else {
            return false;
        };

        groups.iter().flatten().any(|group| self.group_satisfies(group))
    }

    /// Like [`is_compliant`](Self::is_compliant), with a missing filter counting as non-compliant
    pub fn is_compliant_filter(&self, filter: Option<&Node>) -> bool {
        filter.is_some_and(|f| self.is_compliant(f))
    }

    /// Check that every required field is named by some condition in the set
    pub fn conditions_satisfy(&self, conditions: &[Option<Node>]) -> bool {
        self.missing_fields(conditions).is_empty()
    }

    /// Required fields no condition in the set names
    pub fn missing_fields(&self, conditions: &[Option<Node>]) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| {
                !conditions
                    .iter()
                    .flatten()
                    .any(|condition| condition_names_field(condition, field))
            })
            .map(String::as_str)
            .collect()
    }

    fn group_satisfies(&self, group: &Node) -> bool {
        if group.as_object().is_none() {
            return false;
        }

        let is_and = property_value(group, "conjunction")
            .is_some_and(|c| literal_equals(c, AND_CONJUNCTION));

        is_and
            && property_value(group, "conditions")
                .and_then(Node::as_array)
                .is_some_and(|conditions| self.conditions_satisfy(conditions))
    }
}

/// Check that a condition object has `field: "<field>"`
fn condition_names_field(condition: &Node, field: &str) -> bool {
    condition.as_object().is_some()
        && property_value(condition, "field").is_some_and(|value| literal_equals(value, field))
}

/// Check a filter literal against the default required fields
pub fn is_compliant(filter: &Node) -> bool {
    ConditionRequirement::default().is_compliant(filter)
}

use crate::ast::{Node, NodeKind, NodeType};
use crate::predicates::{is_named_property, property_path, property_value};
use crate::query_filter::ConditionRequirement;
use crate::rule::{Rule, RuleCategory, RuleContext, RuleError, RuleMeta, Visitor};

static META: RuleMeta = RuleMeta {
    name: "require-entity-query-conditions",
    description: "entityQuery filters must constrain both status and dental_laboratory, at the top level or in an AND group",
    category: RuleCategory::Correctness,
    recommended: true,
    message: "entityQuery filter must include conditions on both 'status' and 'dental_laboratory', either in 'conditions' or in a group with conjunction 'AND'.",
};

const ENTITY_QUERY: &str = "entityQuery";
const FILTER_PATH: [&str; 2] = ["__args", "filter"];

/// Validates the filter of every `entityQuery` object
///
/// Two shapes trigger the check:
///
/// ```text
/// entityQuery: { __args: { filter: { ... } } }
/// const { entityQuery } = await query({ entityQuery: { __args: { filter } } })
/// ```
pub struct RequireEntityQueryConditions;

impl Rule for RequireEntityQueryConditions {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, _ctx: &RuleContext<'_>) -> Result<Visitor, RuleError> {
        Ok(Visitor::new()
            .on(NodeType::Property, |node, ctx| {
                let Some(entity_query) = entity_query_property(node) else {
                    return;
                };
                check_entity_query(node, entity_query, ctx);
            })
            .on(NodeType::VariableDeclarator, |node, ctx| {
                let Some(entity_query) = destructured_entity_query(node) else {
                    return;
                };
                check_entity_query(node, entity_query, ctx);
            }))
    }
}

/// `entityQuery: { ... }` yields the object literal value
fn entity_query_property(node: &Node) -> Option<&Node> {
    if !is_named_property(node, ENTITY_QUERY) {
        return None;
    }
    match &node.kind {
        NodeKind::Property { value, .. } if value.as_object().is_some() => Some(value.as_ref()),
        _ => None,
    }
}

/// `const { entityQuery } = await f({ entityQuery: <value>, ... })` yields `<value>`
fn destructured_entity_query(node: &Node) -> Option<&Node> {
    let NodeKind::VariableDeclarator { id, init } = &node.kind else {
        return None;
    };

    let destructures_entity_query = match &id.kind {
        NodeKind::ObjectPattern { properties } => properties
            .iter()
            .any(|p| is_named_property(p, ENTITY_QUERY)),
        _ => false,
    };
    if !destructures_entity_query {
        return None;
    }

    let NodeKind::AwaitExpression { argument } = &init.as_deref()?.kind else {
        return None;
    };
    let NodeKind::CallExpression { arguments, .. } = &argument.kind else {
        return None;
    };

    let first = arguments.first()?;
    first.as_object()?;
    property_value(first, ENTITY_QUERY)
}

fn check_entity_query(trigger: &Node, entity_query: &Node, ctx: &mut RuleContext<'_>) {
    let requirement = ConditionRequirement::default();
    let filter = property_path(entity_query, &FILTER_PATH);

    if requirement.is_compliant_filter(filter) {
        return;
    }

    if log::log_enabled!(log::Level::Debug) {
        let top_level = filter.map(|f| property_value(f, "conditions").and_then(Node::as_array));
        let reason = match top_level {
            None => "no __args.filter object".to_string(),
            Some(Some(conditions)) => format!(
                "top-level conditions miss {:?} and no AND group covers them",
                requirement.missing_fields(conditions)
            ),
            Some(None) => "no condition set covers the required fields".to_string(),
        };
        log::debug!(
            "{}: {} at {}:{}: {}",
            META.name,
            ctx.file_path().display(),
            trigger.span.line(),
            trigger.span.column(),
            reason
        );
    }

    ctx.report(trigger, META.message);
}

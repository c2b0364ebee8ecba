use crate::ast::{NodeKind, NodeType};
use crate::predicates::{function_params, is_identifier};
use crate::rule::{Rule, RuleCategory, RuleContext, RuleError, RuleMeta, Visitor};

static META: RuleMeta = RuleMeta {
    name: "require-generic-props",
    description: "component$ calls whose body takes props must declare the props type as a generic argument",
    category: RuleCategory::Style,
    recommended: true,
    message: "Declare the props type on the component: component$<Props>((props) => ...).",
};

const COMPONENT_FACTORY: &str = "component$";

/// Requires `component$<Props>(...)` when the component function takes props
pub struct RequireGenericProps;

impl Rule for RequireGenericProps {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, _ctx: &RuleContext<'_>) -> Result<Visitor, RuleError> {
        Ok(Visitor::new().on(NodeType::CallExpression, |node, ctx| {
            let NodeKind::CallExpression {
                callee,
                arguments,
                type_arguments,
                type_parameters,
            } = &node.kind
            else {
                return;
            };

            if !is_identifier(callee, COMPONENT_FACTORY)
                || type_arguments.is_some()
                || type_parameters.is_some()
            {
                return;
            }

            // A component without parameters has no props to type
            let takes_props = arguments
                .iter()
                .find_map(function_params)
                .is_some_and(|params| !params.is_empty());

            if takes_props {
                ctx.report(node, META.message);
            }
        }))
    }
}

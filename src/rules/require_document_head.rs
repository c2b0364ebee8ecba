use crate::ast::{Node, NodeKind};
use crate::exclusion::ExclusionFilter;
use crate::predicates::{is_function, is_identifier};
use crate::rule::{Rule, RuleCategory, RuleContext, RuleError, RuleMeta, Visitor};
use serde::Deserialize;

static META: RuleMeta = RuleMeta {
    name: "require-document-head",
    description: "Route files must export a `head` function describing the document head",
    category: RuleCategory::Correctness,
    recommended: true,
    message: "Missing `export const head: DocumentHead = () => ({ ... })` in route file.",
};

/// Options for `require-document-head`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeadOptions {
    /// Paths the rule does not apply to (globs, or `/regex/`)
    #[serde(default)]
    pub excluded_files: Vec<String>,
}

/// Requires `export const head = () => ...` at the top level of a file
pub struct RequireDocumentHead;

impl Rule for RequireDocumentHead {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, ctx: &RuleContext<'_>) -> Result<Visitor, RuleError> {
        let options: DocumentHeadOptions = ctx.options()?;
        let exclusions = ExclusionFilter::new(options.excluded_files.as_slice())?;

        if exclusions.is_excluded(ctx.file_path()) {
            log::debug!(
                "{}: {} is excluded",
                META.name,
                ctx.file_path().display()
            );
            return Ok(Visitor::new());
        }

        Ok(Visitor::new().on_file_entry(|program, ctx| {
            if !ctx.body().iter().any(exports_head_function) {
                ctx.report(program, META.message);
            }
        }))
    }
}

/// Check for `export const head = <function expression>`
fn exports_head_function(statement: &Node) -> bool {
    let NodeKind::ExportNamedDeclaration {
        declaration: Some(declaration),
    } = &statement.kind
    else {
        return false;
    };
    let NodeKind::VariableDeclaration { declarations } = &declaration.kind else {
        return false;
    };

    declarations.iter().any(|declarator| match &declarator.kind {
        NodeKind::VariableDeclarator { id, init } => {
            is_identifier(id, "head") && init.as_deref().is_some_and(is_function)
        }
        _ => false,
    })
}

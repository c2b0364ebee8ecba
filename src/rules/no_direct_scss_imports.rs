use crate::ast::{NodeKind, NodeType};
use crate::rule::{Rule, RuleCategory, RuleContext, RuleError, RuleMeta, Visitor};

static META: RuleMeta = RuleMeta {
    name: "no-direct-scss-imports",
    description: "Disallow importing .scss/.css files directly; load styles with useStyles$ or useStylesScoped$",
    category: RuleCategory::Restriction,
    recommended: true,
    message: "Direct stylesheet imports are not allowed. Import the file with '?inline' and pass it to useStylesScoped$ instead.",
};

const STYLESHEET_EXTENSIONS: [&str; 2] = [".scss", ".css"];

/// Flags `import './x.scss'` and `import './x.css'`
pub struct NoDirectScssImports;

impl Rule for NoDirectScssImports {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn create(&self, _ctx: &RuleContext<'_>) -> Result<Visitor, RuleError> {
        Ok(Visitor::new().on(NodeType::ImportDeclaration, |node, ctx| {
            let NodeKind::ImportDeclaration { source } = &node.kind else {
                return;
            };
            let is_stylesheet = source
                .as_literal()
                .and_then(|value| value.as_str())
                .is_some_and(is_stylesheet_path);
            if is_stylesheet {
                ctx.report(node, META.message);
            }
        }))
    }
}

fn is_stylesheet_path(path: &str) -> bool {
    STYLESHEET_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::*;
    use serde_json::{json, Value};

    fn import(source: &str) -> Value {
        json!({
            "type": "ImportDeclaration",
            "specifiers": [],
            "source": lit(source),
            "start": 0,
            "end": 20,
            "loc": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 20 } }
        })
    }

    fn run(sources: &[&str]) -> Vec<crate::Diagnostic> {
        let body = sources.iter().map(|s| import(s)).collect();
        run_rule(META.name, "src/components/card.tsx", Value::Null, program(body))
    }

    #[test]
    fn test_scss_import_reported() {
        let diagnostics = run(&["./x.scss"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "no-direct-scss-imports");
        assert_eq!(diagnostics[0].location.line, 1);
        assert_eq!(diagnostics[0].message, META.message);
    }

    #[test]
    fn test_css_import_reported() {
        assert_eq!(run(&["../styles/global.css"]).len(), 1);
    }

    #[test]
    fn test_script_import_allowed() {
        assert!(run(&["./x.ts", "@builder.io/qwik"]).is_empty());
    }

    #[test]
    fn test_inline_query_allowed() {
        // `?inline` imports are the supported way to load styles
        assert!(run(&["./card.scss?inline"]).is_empty());
    }

    #[test]
    fn test_each_import_reported_once() {
        assert_eq!(run(&["./a.scss", "./b.ts", "./c.css"]).len(), 2);
    }
}

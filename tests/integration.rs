//! Integration tests for conventions-lint

use conventions_lint::config::{LinterConfig, RuleLevel, RuleSetting};
use conventions_lint::output::{JsonFormatter, OutputFormatter, TextFormatter};
use conventions_lint::{Diagnostic, LintError, Linter, Severity};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_path().join(name)
}

/// Recommended rules, with `require-document-head` limited to route files
fn project_config() -> LinterConfig {
    let mut config = LinterConfig::recommended();
    config.set_options(
        "require-document-head",
        json!({ "excludedFiles": ["**/routes/**/layout.tsx", "**/lib/**"] }),
    );
    config
}

fn summary(diagnostics: &[Diagnostic]) -> Vec<(String, usize, usize)> {
    diagnostics
        .iter()
        .map(|d| (d.rule_id.clone(), d.location.line, d.location.column))
        .collect()
}

#[test]
fn test_compliant_route() {
    let linter = Linter::new(LinterConfig::recommended()).unwrap();
    let diagnostics = linter
        .lint_file(&fixture("routes/orders/index.tsx.json"))
        .unwrap();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_legacy_route_breaks_every_convention() {
    let linter = Linter::new(LinterConfig::recommended()).unwrap();
    let diagnostics = linter
        .lint_file(&fixture("routes/legacy/index.tsx.json"))
        .unwrap();

    assert_eq!(
        summary(&diagnostics),
        vec![
            ("require-document-head".to_string(), 1, 1),
            ("no-direct-scss-imports".to_string(), 2, 1),
            ("require-generic-props".to_string(), 4, 16),
            ("require-entity-query-conditions".to_string(), 6, 5),
        ]
    );
    assert!(diagnostics
        .iter()
        .all(|d| d.location.file == fixture("routes/legacy/index.tsx")));
}

#[test]
fn test_layout_excluded_by_options() {
    let path = fixture("routes/orders/layout.tsx.json");

    let linter = Linter::new(LinterConfig::recommended()).unwrap();
    let diagnostics = linter.lint_file(&path).unwrap();
    assert_eq!(summary(&diagnostics), vec![("require-document-head".to_string(), 1, 1)]);

    let linter = Linter::new(project_config()).unwrap();
    assert!(linter.lint_file(&path).unwrap().is_empty());
}

#[test]
fn test_destructured_entity_query() {
    let linter = Linter::new(project_config()).unwrap();
    let diagnostics = linter
        .lint_file(&fixture("lib/load-orders.ts.json"))
        .unwrap();

    // the declarator and the entityQuery property inside the call both trigger
    assert_eq!(
        summary(&diagnostics),
        vec![
            ("require-entity-query-conditions".to_string(), 4, 9),
            ("require-entity-query-conditions".to_string(), 5, 5),
        ]
    );
}

#[test]
fn test_triggers_under_unmodelled_nodes() {
    let linter = Linter::new(LinterConfig::recommended()).unwrap();
    let diagnostics = linter
        .lint_file(&fixture("routes/reports/index.tsx.json"))
        .unwrap();

    // IfStatement, TryStatement, JSX attribute container, TSAsExpression
    assert_eq!(
        summary(&diagnostics),
        vec![
            ("require-entity-query-conditions".to_string(), 10, 7),
            ("require-entity-query-conditions".to_string(), 15, 7),
            ("require-generic-props".to_string(), 28, 53),
            ("require-entity-query-conditions".to_string(), 30, 34),
        ]
    );
}

#[test]
fn test_lint_files_totals() {
    let files = vec![
        fixture("routes/orders/index.tsx.json"),
        fixture("routes/orders/layout.tsx.json"),
        fixture("routes/legacy/index.tsx.json"),
        fixture("lib/load-orders.ts.json"),
    ];

    let linter = Linter::new(project_config()).unwrap();
    let result = linter.lint_files(&files);

    assert_eq!(result.files_processed, 4);
    assert_eq!(result.files_with_errors, 2);
    assert_eq!(result.error_count, 6);
    assert_eq!(result.exit_code(), 2);
}

#[test]
fn test_warn_level_exit_code() {
    let mut config = LinterConfig::default();
    config
        .rules
        .insert("no-direct-scss-imports".to_string(), RuleSetting::new(RuleLevel::Warn));

    let linter = Linter::new(config).unwrap();
    let result = linter.lint_files(&[fixture("routes/legacy/index.tsx.json")]);

    assert_eq!(result.warning_count, 1);
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    assert_eq!(result.exit_code(), 1);
}

#[test]
fn test_invalid_exclusion_pattern() {
    let mut config = LinterConfig::recommended();
    config.set_options("require-document-head", json!({ "excludedFiles": ["/(unclosed/"] }));

    let linter = Linter::new(config).unwrap();
    let err = linter
        .lint_file(&fixture("routes/orders/index.tsx.json"))
        .unwrap_err();
    assert!(matches!(err, LintError::Rule { .. }));
}

#[test]
fn test_missing_file() {
    let linter = Linter::new(LinterConfig::recommended()).unwrap();
    let err = linter.lint_file(Path::new("no/such/file.tsx.json")).unwrap_err();
    assert!(matches!(err, LintError::Io { .. }));
}

#[test]
fn test_text_and_json_output() {
    let linter = Linter::new(LinterConfig::recommended()).unwrap();
    let result = linter.lint_files(&[fixture("routes/legacy/index.tsx.json")]);

    let text = TextFormatter::new().without_color().format(&result);
    assert!(text.contains("error[no-direct-scss-imports]"));
    assert!(text.contains("1 file processed: 4 errors"));

    let value: serde_json::Value =
        serde_json::from_str(&JsonFormatter::new().format(&result)).unwrap();
    assert_eq!(value["summary"]["error_count"], 4);
    assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_cli_json_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_conventions-lint"))
        .arg(fixture("lib/load-orders.ts.json"))
        .args(["--format", "json", "--no-color"])
        .args(["--rule", "require-document-head=off"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["error_count"], 2);
    assert_eq!(
        value["diagnostics"][0]["rule_id"],
        "require-entity-query-conditions"
    );
}

#[test]
fn test_cli_options_override() {
    let output = Command::new(env!("CARGO_BIN_EXE_conventions-lint"))
        .arg(fixture("routes/orders/layout.tsx.json"))
        .arg("--no-color")
        .args([
            "--options",
            r#"require-document-head={"excludedFiles":["**/layout.tsx"]}"#,
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 file processed"));
}

#[test]
fn test_cli_list_rules() {
    let output = Command::new(env!("CARGO_BIN_EXE_conventions-lint"))
        .args(["--list-rules", "--no-color"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "no-direct-scss-imports",
        "require-document-head",
        "require-entity-query-conditions",
        "require-generic-props",
    ] {
        assert!(stdout.contains(name), "missing {}", name);
    }
}

#[test]
fn test_cli_list_rules_by_category() {
    let output = Command::new(env!("CARGO_BIN_EXE_conventions-lint"))
        .args(["--list-rules", "--category", "restriction", "--no-color"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no-direct-scss-imports"));
    assert!(!stdout.contains("require-document-head"));
    assert!(!stdout.contains("require-generic-props"));

    let output = Command::new(env!("CARGO_BIN_EXE_conventions-lint"))
        .args(["--list-rules", "--category", "perf"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown category: perf"));
}

#[test]
fn test_cli_config_file_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let bare = dir.path().join("bare.json");
    std::fs::write(&bare, r#"{ "require-entity-query-conditions": "off" }"#).unwrap();
    let wrapped = dir.path().join("wrapped.json");
    std::fs::write(
        &wrapped,
        r#"{ "rules": { "require-entity-query-conditions": "off" } }"#,
    )
    .unwrap();

    for config in [&bare, &wrapped] {
        let output = Command::new(env!("CARGO_BIN_EXE_conventions-lint"))
            .arg(fixture("lib/load-orders.ts.json"))
            .args(["--rule", "require-document-head=off", "--no-color"])
            .arg("--config")
            .arg(config)
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(0), "{}", config.display());
    }
}

#[test]
fn test_cli_unknown_rule() {
    let output = Command::new(env!("CARGO_BIN_EXE_conventions-lint"))
        .arg(fixture("routes/orders/index.tsx.json"))
        .args(["--rule", "no-such-rule=error", "--no-color"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown rule: no-such-rule"));
}

//! conventions-lint CLI
//!
//! Lints ESTree JSON dumps (`route.tsx.json`) against the project's
//! Qwik conventions.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use conventions_lint::config::{LinterConfig, RuleLevel};
use conventions_lint::output::{JsonFormatter, OutputFormatter, TextFormatter};
use conventions_lint::{rules, Linter, RuleCategory};
use glob::glob;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "conventions-lint",
    version,
    about = "Qwik project convention linter",
    long_about = "Checks ESTree JSON dumps of TypeScript/TSX files against project conventions: \
                  route head exports, stylesheet imports, component props generics and \
                  entityQuery filter conditions."
)]
struct Cli {
    /// ESTree JSON files or glob patterns to lint
    files: Vec<String>,

    /// JSON rules mapping, bare or as `{ "rules": { ... } }`, applied over the recommended preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Set a rule level (NAME=off|warn|error)
    #[arg(long = "rule", value_name = "NAME=LEVEL")]
    rules: Vec<String>,

    /// Set a rule's options (NAME=JSON)
    #[arg(long = "options", value_name = "NAME=JSON")]
    options: Vec<String>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Only list rules of this category (correctness, suspicious, style, restriction)
    #[arg(long, value_name = "CATEGORY", requires = "list_rules")]
    category: Option<RuleCategory>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    if cli.list_rules {
        print_rules(cli.category);
        return Ok(0);
    }

    let config = build_config(&cli)?;
    let linter = Linter::new(config).context("invalid configuration")?;
    log::debug!("{} rules enabled", linter.rule_count());

    let files = expand_files(&cli.files)?;
    if files.is_empty() {
        bail!("no files found to lint");
    }

    let result = linter.lint_files(&files);

    let formatter: Box<dyn OutputFormatter> = match cli.format {
        Format::Text if cli.no_color => Box::new(TextFormatter::new().without_color()),
        Format::Text => Box::new(TextFormatter::new()),
        Format::Json => Box::new(JsonFormatter::new().pretty()),
    };
    print!("{}", formatter.format(&result));

    Ok(result.exit_code())
}

fn build_config(cli: &Cli) -> anyhow::Result<LinterConfig> {
    let mut config = LinterConfig::recommended();
    config.jobs = cli.jobs;

    if let Some(path) = &cli.config {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file = LinterConfig::from_rules_json(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.rules.extend(file.rules);
    }

    for arg in &cli.rules {
        let (name, level) = split_assignment(arg)?;
        let level: RuleLevel = level
            .parse()
            .with_context(|| format!("in --rule {}", arg))?;
        config.set_level(name, level);
    }

    for arg in &cli.options {
        let (name, json) = split_assignment(arg)?;
        let options: serde_json::Value = serde_json::from_str(json)
            .with_context(|| format!("invalid JSON in --options {}", arg))?;
        config.set_options(name, options);
    }

    Ok(config)
}

fn split_assignment(arg: &str) -> anyhow::Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.trim(), value.trim())),
        _ => bail!("expected NAME=VALUE, got '{}'", arg),
    }
}

fn expand_files(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let paths = glob(pattern).with_context(|| format!("invalid pattern '{}'", pattern))?;
        for entry in paths.flatten() {
            if entry.is_file() {
                files.push(entry);
            }
        }
    }
    Ok(files)
}

fn print_rules(category: Option<RuleCategory>) {
    println!("{}", "Available rules:".bold());
    println!();
    for (name, rule) in rules() {
        let meta = rule.meta();
        if category.is_some_and(|c| c != meta.category) {
            continue;
        }
        let marker = if meta.recommended {
            "recommended".green()
        } else {
            "".normal()
        };
        println!("  {} ({}) {}", name.cyan(), meta.category, marker);
        println!("      {}", meta.description);
    }
}

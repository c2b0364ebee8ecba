//! Resolved rule settings
//!
//! Settings use the familiar ESLint shape, either a bare level or a level
//! followed by the rule's options:
//!
//! ```json
//! {
//!   "no-direct-scss-imports": "error",
//!   "require-document-head": ["warn", { "excludedFiles": ["**/layout.tsx"] }]
//! }
//! ```
//!
//! Discovering and merging configuration files is left to the caller.

use crate::diagnostic::Severity;
use crate::rules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Invalid rule level '{0}' (expected off, warn, error, 0, 1 or 2)")]
    InvalidLevel(String),

    #[error("Invalid rule setting '{0}' (expected a level or [level, options])")]
    InvalidSetting(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a rule is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "String")]
pub enum RuleLevel {
    #[default]
    Off,
    Warn,
    Error,
}

impl RuleLevel {
    /// Severity of diagnostics reported at this level (`None` when off)
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Warn => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleLevel::Off => "off",
            RuleLevel::Warn => "warn",
            RuleLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Ok(RuleLevel::Off),
            "warn" | "warning" | "1" => Ok(RuleLevel::Warn),
            "error" | "2" => Ok(RuleLevel::Error),
            _ => Err(ConfigError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<serde_json::Value> for RuleLevel {
    type Error = ConfigError;

    fn try_from(value: serde_json::Value) -> Result<Self, ConfigError> {
        match value {
            serde_json::Value::String(s) => s.parse(),
            serde_json::Value::Number(n) => n.to_string().parse(),
            other => Err(ConfigError::InvalidLevel(other.to_string())),
        }
    }
}

impl From<RuleLevel> for String {
    fn from(level: RuleLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Level plus options for one rule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawRuleSetting")]
pub struct RuleSetting {
    pub level: RuleLevel,
    /// First positional option (`Null` when absent)
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRuleSetting {
    Level(RuleLevel),
    WithOptions(Vec<serde_json::Value>),
}

impl TryFrom<RawRuleSetting> for RuleSetting {
    type Error = ConfigError;

    fn try_from(raw: RawRuleSetting) -> Result<Self, ConfigError> {
        match raw {
            RawRuleSetting::Level(level) => Ok(RuleSetting::new(level)),
            RawRuleSetting::WithOptions(values) => {
                let mut values = values.into_iter();
                let level = values
                    .next()
                    .ok_or_else(|| ConfigError::InvalidSetting("[]".to_string()))?;
                let level = RuleLevel::try_from(level)?;
                Ok(RuleSetting::with_options(
                    level,
                    values.next().unwrap_or_default(),
                ))
            }
        }
    }
}

impl RuleSetting {
    pub fn new(level: RuleLevel) -> Self {
        Self {
            level,
            options: serde_json::Value::Null,
        }
    }

    pub fn with_options(level: RuleLevel, options: serde_json::Value) -> Self {
        Self { level, options }
    }

    pub fn is_enabled(&self) -> bool {
        self.level != RuleLevel::Off
    }
}

/// Linter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinterConfig {
    /// Rule name -> setting
    pub rules: BTreeMap<String, RuleSetting>,

    /// Lint files in parallel
    pub parallel: bool,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            parallel: true,
            jobs: 0,
        }
    }
}

impl LinterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recommended rule at `error`
    pub fn recommended() -> Self {
        let rules = rules::rules()
            .into_values()
            .filter(|rule| rule.meta().recommended)
            .map(|rule| (rule.name().to_string(), RuleSetting::new(RuleLevel::Error)))
            .collect();

        Self {
            rules,
            ..Self::default()
        }
    }

    /// Get a preset configuration by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::recommended()),
            "off" => Some(Self::default()),
            _ => None,
        }
    }

    /// Decode a rules mapping from JSON, either bare or as `{ "rules": { ... } }`
    pub fn from_rules_json(json: &str) -> Result<Self, ConfigError> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(rules) = value.get_mut("rules").filter(|rules| rules.is_object()) {
            value = rules.take();
        }
        let rules = serde_json::from_value(value)?;
        Ok(Self {
            rules,
            ..Self::default()
        })
    }

    /// Set a rule's level, keeping its options
    pub fn set_level(&mut self, rule: &str, level: RuleLevel) {
        self.rules.entry(rule.to_string()).or_default().level = level;
    }

    /// Set a rule's options, keeping its level
    pub fn set_options(&mut self, rule: &str, options: serde_json::Value) {
        self.rules.entry(rule.to_string()).or_default().options = options;
    }

    /// Check that every configured rule exists
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .rules
            .keys()
            .find(|name| rules::find_rule(name).is_none())
        {
            Some(name) => Err(ConfigError::UnknownRule(name.clone())),
            None => Ok(()),
        }
    }

    /// Enabled rules in name order
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(name, setting)| (name.as_str(), setting))
    }
}

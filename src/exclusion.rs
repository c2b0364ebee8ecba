//! File exclusion patterns
//!
//! Patterns are globs (`src/routes/**/layout.tsx`). A pattern written between
//! slashes (`/\.test\.tsx$/`) is a regular expression matched anywhere in the
//! path. Paths are compared with `/` separators on every platform.

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// Error compiling an exclusion pattern
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid regex pattern '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Compiled set of exclusion patterns
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    globs: GlobSet,
    regexes: Vec<Regex>,
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self {
            globs: GlobSet::empty(),
            regexes: Vec::new(),
        }
    }
}

impl ExclusionFilter {
    /// Compile a list of patterns
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let mut builder = GlobSetBuilder::new();
        let mut regexes = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if let Some(expr) = regex_body(pattern) {
                let re = Regex::new(expr).map_err(|source| PatternError::Regex {
                    pattern: pattern.to_string(),
                    source,
                })?;
                regexes.push(re);
            } else {
                let glob = Glob::new(pattern).map_err(|source| PatternError::Glob {
                    pattern: pattern.to_string(),
                    source,
                })?;
                builder.add(glob);
            }
        }

        let globs = builder.build().map_err(|source| PatternError::Glob {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            source,
        })?;

        Ok(Self { globs, regexes })
    }

    /// Check whether no pattern was configured
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty() && self.regexes.is_empty()
    }

    /// Check a path against every pattern (match-any)
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.is_empty() {
            return false;
        }

        let normalized = path.to_string_lossy().replace('\\', "/");
        self.globs.is_match(&normalized) || self.regexes.iter().any(|re| re.is_match(&normalized))
    }
}

/// Compile `patterns` and test `path` against them
pub fn is_excluded<S: AsRef<str>>(path: &Path, patterns: &[S]) -> Result<bool, PatternError> {
    Ok(ExclusionFilter::new(patterns)?.is_excluded(path))
}

fn regex_body(pattern: &str) -> Option<&str> {
    pattern
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .filter(|body| !body.is_empty())
}

//! Environment variable loading utilities
//!
//! Blank values are treated the same as unset ones. A value that is set
//! but cannot be parsed is an error rather than a silent fallback.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::config::ConfigError;

/// Load an environment variable with a string default
pub fn load_env_string(key: &str, default: &str) -> String {
    load_trimmed(key).unwrap_or_else(|| default.to_string())
}

fn load_trimmed(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads variables sharing a common prefix, e.g. `JIRA_URL`, `JIRA_USERNAME`
#[derive(Debug)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Loader for variables named `{prefix}_{suffix}`
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Full variable name for a suffix, e.g. `JIRA` + `URL` -> `JIRA_URL`
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Trimmed value, or `None` when unset or blank
    pub fn load_non_empty(&self, suffix: &str) -> Option<String> {
        load_trimmed(&self.key(suffix))
    }

    /// Trimmed value that must be present
    pub fn require(&self, suffix: &str) -> Result<String, ConfigError> {
        self.load_non_empty(suffix)
            .ok_or_else(|| ConfigError::Missing {
                variable: self.key(suffix),
            })
    }

    /// Parsed value, `default` when unset or blank
    pub fn load_parsed<T>(&self, suffix: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.load_non_empty(suffix) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                field: self.key(suffix),
                value: raw.clone(),
                hint: e.to_string(),
            }),
        }
    }
}

//! Configuration management for jira-mcp
//!
//! The Jira connection settings are read once at startup from environment
//! variables and handed to [`JiraClient::new`](crate::jira::JiraClient::new)
//! by reference. Nothing in the library reads the environment after that.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `JIRA_URL` | Base URL of the Jira instance | required |
//! | `JIRA_USERNAME` | Basic auth user name | required |
//! | `JIRA_API_TOKEN` | Basic auth API token | required |
//! | `JIRA_TIMEOUT_SECS` | Per request timeout | 30 |

use crate::common::env_loader::EnvLoader;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Prefix shared by all Jira environment variables
pub const ENV_PREFIX: &str = "JIRA";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration loading
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or blank
    #[error("Missing required environment variable {variable}")]
    Missing {
        /// Name of the missing variable
        variable: String,
    },

    /// The base URL could not be parsed or is not http(s)
    #[error("Invalid Jira URL '{value}': {reason}")]
    InvalidUrl {
        /// The offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Invalid configuration value for a specific field
    #[error("Invalid configuration value for '{field}': {value}\n{hint}")]
    InvalidValue {
        /// Name of the configuration field
        field: String,
        /// The invalid value that was provided
        value: String,
        /// Helpful hint about how to fix the issue
        hint: String,
    },
}

/// Connection settings for a Jira instance
#[derive(Clone, PartialEq, Eq)]
pub struct JiraConfig {
    base_url: Url,
    username: String,
    api_token: String,
    timeout: Duration,
}

impl JiraConfig {
    /// Build a configuration from explicit values
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.into();
        let api_token = api_token.into();

        if username.trim().is_empty() {
            return Err(ConfigError::Missing {
                variable: format!("{ENV_PREFIX}_USERNAME"),
            });
        }
        if api_token.trim().is_empty() {
            return Err(ConfigError::Missing {
                variable: format!("{ENV_PREFIX}_API_TOKEN"),
            });
        }

        Ok(Self {
            base_url: Self::parse_base_url(base_url)?,
            username,
            api_token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load the configuration from `JIRA_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let loader = EnvLoader::new(ENV_PREFIX);

        let base_url = loader.require("URL")?;
        let username = loader.require("USERNAME")?;
        let api_token = loader.require("API_TOKEN")?;

        let timeout_secs = loader.load_parsed("TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: loader.key("TIMEOUT_SECS"),
                value: timeout_secs.to_string(),
                hint: "Timeout must be at least one second".to_string(),
            });
        }

        let config = Self::new(&base_url, username, api_token)?
            .with_timeout(Duration::from_secs(timeout_secs));

        tracing::debug!("Loaded Jira configuration: {:?}", config);
        Ok(config)
    }

    /// Override the HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL, always ending in `/` so relative joins keep any path prefix
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Basic auth user name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Basic auth API token
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Per request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            value: value.to_string(),
            reason,
        };

        let mut url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

//! Error handling for the jira-mcp CLI
//!
//! Commands return [`CliResult`] so the source chain survives until `main`
//! turns it into a message on stderr and a process exit code.

use std::error::Error;
use std::fmt;

use jira_mcp::{ConfigError, JiraMcpError};

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error carrying the exit code the process should end with
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error with a message and exit code
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Wrap another error, keeping it as the source
    pub fn from_error<E: Error + Send + Sync + 'static>(error: E, exit_code: i32) -> Self {
        Self {
            message: error.to_string(),
            exit_code,
            source: Some(Box::new(error)),
        }
    }

    /// Runtime failure, exit code 1
    pub fn general<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_WARNING)
    }

    /// Bad input or configuration, exit code 2
    pub fn validation<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self::from_error(error, EXIT_ERROR)
    }

    /// Message followed by every `Caused by:` line in the source chain
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current = Error::source(self);
        while let Some(err) = current {
            result.push_str(&format!("\n  Caused by: {err}"));
            current = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::validation(error)
    }
}

impl From<JiraMcpError> for CliError {
    fn from(error: JiraMcpError) -> Self {
        match error {
            JiraMcpError::Config(config) => Self::validation(config),
            other => Self::general(other),
        }
    }
}

/// Extension trait for converting results to CLI results
pub trait IntoCliResult<T> {
    fn cli_error(self, exit_code: i32) -> CliResult<T>;
    fn cli_general_error(self) -> CliResult<T>;
    fn cli_validation_error(self) -> CliResult<T>;
}

impl<T, E: Error + Send + Sync + 'static> IntoCliResult<T> for Result<T, E> {
    fn cli_error(self, exit_code: i32) -> CliResult<T> {
        self.map_err(|e| CliError::from_error(e, exit_code))
    }

    fn cli_general_error(self) -> CliResult<T> {
        self.map_err(CliError::general)
    }

    fn cli_validation_error(self) -> CliResult<T> {
        self.map_err(CliError::validation)
    }
}

/// Convert a command result to an exit code, printing the error chain on failure
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e.full_chain());
            if e.exit_code == EXIT_SUCCESS {
                EXIT_WARNING
            } else {
                e.exit_code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_maps_to_exit_error() {
        let error: CliError = ConfigError::Missing {
            variable: "JIRA_URL".to_string(),
        }
        .into();

        assert_eq!(error.exit_code, EXIT_ERROR);
        assert!(error.message.contains("JIRA_URL"));
    }

    #[test]
    fn test_full_chain_includes_sources() {
        let io = std::io::Error::other("disk on fire");
        let error = CliError::general(JiraMcpError::Io(io));

        let chain = error.full_chain();
        assert!(chain.starts_with("IO error: disk on fire"));
        assert!(chain.contains("Caused by: disk on fire"));
    }

    #[test]
    fn test_handle_cli_result_passes_through_code() {
        assert_eq!(handle_cli_result(Ok(EXIT_WARNING)), EXIT_WARNING);
        assert_eq!(
            handle_cli_result(Err(CliError::new("bad input", EXIT_ERROR))),
            EXIT_ERROR
        );
    }

    #[test]
    fn test_handle_cli_result_never_reports_success_for_errors() {
        assert_eq!(
            handle_cli_result(Err(CliError::new("odd", EXIT_SUCCESS))),
            EXIT_WARNING
        );
    }

    #[test]
    fn test_into_cli_result_conversions() {
        let failed: Result<(), std::io::Error> = Err(std::io::Error::other("nope"));
        assert_eq!(failed.cli_validation_error().unwrap_err().exit_code, EXIT_ERROR);

        let failed: Result<(), std::io::Error> = Err(std::io::Error::other("nope"));
        assert_eq!(failed.cli_error(7).unwrap_err().exit_code, 7);
    }
}

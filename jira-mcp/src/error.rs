//! Unified error handling for the jira-mcp library
//!
//! Two layers of errors live here. [`ToolError`] is the structured error
//! carried inside a [`ResultEnvelope`](crate::mcp::ResultEnvelope) and is
//! what the MCP host ultimately sees. [`JiraMcpError`] covers setup
//! failures (configuration, registration, client construction) that happen
//! before any tool is dispatched.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;
use crate::jira::JiraError;

/// The main error type for process setup
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JiraMcpError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tool registration failed
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The Jira client could not be constructed or failed
    #[error("Jira error: {0}")]
    Jira(#[from] JiraError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, JiraMcpError>;

/// Errors raised while building a [`ToolRegistry`](crate::mcp::ToolRegistry)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A tool with the same name is already registered
    #[error("Tool '{name}' is already registered")]
    DuplicateName {
        /// Name of the conflicting tool
        name: String,
    },
}

impl From<RegistryError> for ToolError {
    fn from(error: RegistryError) -> Self {
        match &error {
            RegistryError::DuplicateName { name } => ToolError {
                kind: ToolErrorKind::DuplicateName,
                message: error.to_string(),
                field: Some(name.clone()),
            },
        }
    }
}

/// Classification of every failure a dispatch can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// A required argument was absent or null
    MissingField,
    /// An argument had the wrong JSON type
    TypeMismatch,
    /// The remote reported that the issue does not exist
    NotFound,
    /// The remote rejected the payload, or a domain precondition failed
    Validation,
    /// The remote rejected the search query
    QuerySyntax,
    /// Any other transport or API failure
    Remote,
    /// The host cancelled the call before it finished
    Cancelled,
    /// No tool is registered under the requested name
    UnknownTool,
    /// A tool name was registered twice
    DuplicateName,
    /// Serialization or invariant failure inside this layer
    Internal,
}

impl ToolErrorKind {
    /// Stable identifier used in serialized errors and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolErrorKind::MissingField => "missing_field",
            ToolErrorKind::TypeMismatch => "type_mismatch",
            ToolErrorKind::NotFound => "not_found",
            ToolErrorKind::Validation => "validation",
            ToolErrorKind::QuerySyntax => "query_syntax",
            ToolErrorKind::Remote => "remote",
            ToolErrorKind::Cancelled => "cancelled",
            ToolErrorKind::UnknownTool => "unknown_tool",
            ToolErrorKind::DuplicateName => "duplicate_name",
            ToolErrorKind::Internal => "internal",
        }
    }

    /// Whether the failure was detected before any remote call was made
    pub fn is_pre_dispatch(&self) -> bool {
        matches!(
            self,
            ToolErrorKind::MissingField
                | ToolErrorKind::TypeMismatch
                | ToolErrorKind::UnknownTool
                | ToolErrorKind::DuplicateName
        )
    }
}

impl fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error placed in the failure branch of a result envelope
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ToolError {
    /// Failure classification
    pub kind: ToolErrorKind,
    /// Human readable description
    pub message: String,
    /// Argument (or tool) the error refers to, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ToolError {
    /// Create an error of the given kind
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    /// Attach the argument name this error refers to
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// A required argument is missing
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ToolErrorKind::MissingField,
            format!("Missing required field '{field}'"),
        )
        .with_field(field)
    }

    /// An argument has the wrong JSON type
    pub fn type_mismatch(field: &str, expected: &str, got: &str) -> Self {
        Self::new(
            ToolErrorKind::TypeMismatch,
            format!("Invalid type for field '{field}': expected {expected}, got {got}"),
        )
        .with_field(field)
    }

    /// The remote issue does not exist
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    /// Payload rejected or precondition failed
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Validation, message)
    }

    /// Malformed search query
    pub fn query_syntax(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::QuerySyntax, message)
    }

    /// Transport or API failure
    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Remote, message)
    }

    /// Call cancelled by the host
    pub fn cancelled(tool: &str) -> Self {
        Self::new(
            ToolErrorKind::Cancelled,
            format!("Call to '{tool}' was cancelled"),
        )
    }

    /// Unregistered tool name
    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ToolErrorKind::UnknownTool, format!("Unknown tool: {name}")).with_field(name)
    }

    /// Serialization or invariant failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, message)
    }
}

//! # jira-mcp
//!
//! A typed tool adapter exposing a subset of the Jira REST API to a Model
//! Context Protocol (MCP) host.
//!
//! ## Architecture
//!
//! ```text
//! MCP host ──▶ ToolRegistry::dispatch(name, args)
//!                 │
//!                 ├─▶ binder::bind          (validate untyped arguments)
//!                 ├─▶ McpTool::execute      (get / create / search / edit)
//!                 │      └─▶ IssueClient    (Jira REST API)
//!                 └─▶ ResultEnvelope        (payload or structured error)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_mcp::{JiraConfig, McpServer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = JiraConfig::from_env()?;
//! let server = McpServer::from_config(&config)?;
//!
//! let envelope = server
//!     .call_tool_by_name("get_jira_issue", serde_json::Map::new())
//!     .await;
//! println!("{envelope:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Shared helpers
pub mod common;

/// Environment driven configuration
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Jira REST client and domain types
pub mod jira;

/// Model Context Protocol (MCP) tool layer
pub mod mcp;

/// Test utilities module for testing support
#[doc(hidden)]
pub mod test_utils;

pub use config::{ConfigError, JiraConfig};
pub use error::{JiraMcpError, RegistryError, Result, ToolError, ToolErrorKind};
pub use jira::{Issue, IssueClient, JiraClient, JiraError};
pub use mcp::{McpServer, ResultEnvelope, ToolContext, ToolRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! jira-mcp CLI Library
//!
//! Command-line definitions, diagnostics and the glue that runs the MCP
//! server over stdio.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Diagnostics for installation, configuration and connectivity
pub mod doctor;
/// CLI error type and exit code mapping
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log destination and subscriber setup
pub mod logging;
/// Direct tool invocation for the `call` command
pub mod mcp_integration;
/// Stdio MCP server runner
pub mod server;
/// Shutdown signal handling
pub mod signal_handler;
/// Tool listing for the `tools` command
pub mod tools;

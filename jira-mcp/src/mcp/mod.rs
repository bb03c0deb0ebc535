//! Model Context Protocol (MCP) tool layer
//!
//! This module binds untyped MCP tool calls to typed Jira operations and
//! serves them through an `rmcp` server handler.

pub mod binder;
pub mod envelope;
pub mod server;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;

#[cfg(test)]
mod tests;

// Re-export commonly used items from submodules
pub use binder::{ArgumentKind, ArgumentSpec, DefaultValue};
pub use envelope::ResultEnvelope;
pub use server::McpServer;
pub use tool_registry::{register_issue_tools, McpTool, ToolContext, ToolRegistry};

//! MCP tool implementations, grouped by the entity they act on

pub mod issues;

//! Issue tools for MCP operations
//!
//! Each tool is in its own submodule with a dedicated implementation and
//! a `description.md` advertised to the MCP host.

pub mod create;
pub mod edit;
pub mod get;
pub mod search;

use crate::error::RegistryError;
use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(get::GetIssueTool::new())?;
    registry.register(create::CreateIssueTool::new())?;
    registry.register(search::SearchIssueTool::new())?;
    registry.register(edit::EditIssueTool::new())?;
    Ok(())
}

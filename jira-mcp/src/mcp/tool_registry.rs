//! Tool registry for MCP operations
//!
//! Tools are registered once at startup and looked up by exact name on
//! every call. [`ToolRegistry::dispatch`] is the single entry point: it
//! binds arguments, runs the tool and always produces a
//! [`ResultEnvelope`], whatever happens along the way.

use super::binder::{self, ArgumentSpec};
use super::envelope::ResultEnvelope;
use crate::error::{RegistryError, ToolError};
use crate::jira::IssueClient;
use futures_util::FutureExt;
use rmcp::model::Tool;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Remote issue tracker
    pub client: Arc<dyn IssueClient>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(client: Arc<dyn IssueClient>) -> Self {
        Self { client }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Declared arguments, in order
    fn arguments(&self) -> &'static [ArgumentSpec];

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> Map<String, Value> {
        binder::input_schema(self.arguments())
    }

    /// Execute the tool with already bound arguments
    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<ResultEnvelope, ToolError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn McpTool>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        let name = tool.name();
        if self.index.contains_key(name) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }

        tracing::debug!("Registering tool {}", name);
        self.index.insert(name, self.tools.len());
        self.tools.push(Box::new(tool));
        Ok(())
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// List all registered tool names in registration order
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|tool| Tool {
                name: tool.name().into(),
                description: Some(tool.description().into()),
                input_schema: Arc::new(tool.schema()),
                annotations: None,
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the named tool and wrap its outcome in an envelope
    ///
    /// Unknown names and argument errors are reported without running
    /// anything. Once the tool is running, `cancel` drops the in-flight
    /// future and a panic inside the tool becomes an `Internal` error.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Map<String, Value>,
        context: &ToolContext,
        cancel: &CancellationToken,
    ) -> ResultEnvelope {
        let Some(tool) = self.get_tool(name) else {
            tracing::warn!("Call to unknown tool '{}'", name);
            return ToolError::unknown_tool(name).into();
        };

        let bound = match binder::bind(&arguments, tool.arguments()) {
            Ok(bound) => bound,
            Err(error) => {
                tracing::debug!("Rejected arguments for '{}': {}", name, error);
                return error.into();
            }
        };

        tracing::debug!("Dispatching '{}' with {:?}", name, bound);
        let started = Instant::now();
        let call = AssertUnwindSafe(tool.execute(bound, context)).catch_unwind();

        let envelope = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Call to '{}' cancelled", name);
                ToolError::cancelled(name).into()
            }
            outcome = call => match outcome {
                Ok(Ok(envelope)) => envelope,
                Ok(Err(error)) => error.into(),
                Err(_) => {
                    tracing::error!("Tool '{}' panicked", name);
                    ToolError::internal(format!("Tool '{name}' panicked")).into()
                }
            },
        };

        tracing::debug!(
            "'{}' finished in {:?} (success: {})",
            name,
            started.elapsed(),
            envelope.is_success()
        );
        envelope
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse bound arguments into a typed request struct
    ///
    /// The binder has already checked presence and types, so a failure here
    /// means the request struct disagrees with the declared arguments.
    pub fn parse_arguments<T: DeserializeOwned>(
        arguments: Map<String, Value>,
    ) -> Result<T, ToolError> {
        binder::decode_bound(arguments)
    }

    /// Create a success response with serializable content
    pub fn create_success_response<T: Serialize>(content: &T) -> Result<ResultEnvelope, ToolError> {
        match ResultEnvelope::success(content) {
            ResultEnvelope::Failure { error } => Err(error),
            envelope => Ok(envelope),
        }
    }
}

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    use crate::mcp::tools::issues;
    issues::register_issue_tools(registry)
}

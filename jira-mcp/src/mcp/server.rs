//! MCP server implementation exposing the Jira issue tools

use crate::config::JiraConfig;
use crate::jira::{IssueClient, JiraClient};
use crate::Result;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::envelope::ResultEnvelope;
use super::tool_registry::{register_issue_tools, ToolContext, ToolRegistry};

const SERVER_NAME: &str = "jira-mcp";

const INSTRUCTIONS: &str = "Tools for working with Jira issues. Use get_jira_issue to read an issue, \
search_jira_issue to find issues with JQL, create_jira_issue to open a new issue and \
edit_jira_issue to replace an issue description. Failed calls return a JSON error with a \
`kind` such as not_found, validation or query_syntax.";

/// MCP server for the Jira issue tools
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server backed by the given issue client
    ///
    /// # Errors
    ///
    /// Returns an error if two tools are registered under the same name.
    pub fn new(client: Arc<dyn IssueClient>) -> Result<Self> {
        let mut tool_registry = ToolRegistry::new();
        register_issue_tools(&mut tool_registry)?;

        tracing::debug!(
            "Registered {} tools: {:?}",
            tool_registry.len(),
            tool_registry.list_tool_names()
        );

        Ok(Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(client)),
        })
    }

    /// Create a server talking to the Jira instance described by `config`
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        let client = JiraClient::new(config)?;
        tracing::info!("Using Jira at {}", client.base_url());
        Self::new(Arc::new(client))
    }

    /// The registry holding every tool this server exposes
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Call a tool without a cancellation signal
    pub async fn call_tool_by_name(
        &self,
        name: &str,
        arguments: serde_json::Map<String, Value>,
    ) -> ResultEnvelope {
        self.call_tool_with_cancellation(name, arguments, &CancellationToken::new())
            .await
    }

    /// Call a tool, abandoning it when `cancel` fires
    pub async fn call_tool_with_cancellation(
        &self,
        name: &str,
        arguments: serde_json::Map<String, Value>,
        cancel: &CancellationToken,
    ) -> ResultEnvelope {
        self.tool_registry
            .dispatch(name, arguments, &self.tool_context, cancel)
            .await
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: None,
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(self.get_info())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let envelope = self
            .call_tool_with_cancellation(
                &request.name,
                request.arguments.unwrap_or_default(),
                &context.ct,
            )
            .await;

        match envelope.error() {
            Some(error) if error.kind.is_pre_dispatch() => {
                tracing::debug!("Rejected call to '{}': {}", request.name, error);
            }
            Some(error) => tracing::warn!("Tool '{}' failed: {}", request.name, error),
            None => {}
        }
        Ok(envelope.into_call_tool_result())
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}

//! Issue get tool for MCP operations
//!
//! This module provides the GetIssueTool for fetching a single Jira issue through the MCP protocol.

use crate::error::ToolError;
use crate::jira::GET_ISSUE_FIELDS;
use crate::mcp::binder::{ArgumentKind, ArgumentSpec};
use crate::mcp::envelope::ResultEnvelope;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation, Operation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ARGUMENTS: &[ArgumentSpec] = &[ArgumentSpec::required(
    "issue_key",
    ArgumentKind::String,
    "The issue key to retrieve",
)];

/// Request structure for getting an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetIssueRequest {
    /// Key of the issue to fetch
    pub issue_key: String,
}

/// Tool for fetching issue details
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "get_jira_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    async fn execute(
        &self,
        arguments: Map<String, Value>,
        context: &ToolContext,
    ) -> Result<ResultEnvelope, ToolError> {
        let request: GetIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let key = McpValidation::validate_not_empty(&request.issue_key, "issue_key")?;

        tracing::debug!("Getting issue {}", key);

        let issue = context
            .client
            .get_issue(key, GET_ISSUE_FIELDS)
            .await
            .map_err(|e| McpErrorHandler::handle_jira_error(e, Operation::GetIssue, key))?;

        BaseToolImpl::create_success_response(&issue)
    }
}

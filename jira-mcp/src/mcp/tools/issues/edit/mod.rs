//! Issue edit tool for MCP operations
//!
//! This module provides the EditIssueTool for replacing an issue description
//! through the MCP protocol.

use crate::error::ToolError;
use crate::mcp::binder::{ArgumentKind, ArgumentSpec};
use crate::mcp::envelope::ResultEnvelope;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation, Operation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required(
        "issue_key",
        ArgumentKind::String,
        "The issue key to edit",
    ),
    ArgumentSpec::required(
        "description",
        ArgumentKind::String,
        "The new description of the issue",
    ),
];

/// Request structure for editing an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditIssueRequest {
    /// Key of the issue to edit
    pub issue_key: String,
    /// Replacement description
    pub description: String,
}

/// Tool for editing issue descriptions
#[derive(Default)]
pub struct EditIssueTool;

impl EditIssueTool {
    /// Creates a new instance of the EditIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for EditIssueTool {
    fn name(&self) -> &'static str {
        "edit_jira_issue"
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
        let request: EditIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let key = McpValidation::validate_not_empty(&request.issue_key, "issue_key")?;

        let mut fields = Map::new();
        fields.insert(
            "description".to_string(),
            Value::String(request.description.clone()),
        );

        tracing::debug!("Updating description of {}", key);

        let issue = context
            .client
            .update_issue_fields(key, fields)
            .await
            .map_err(|e| McpErrorHandler::handle_jira_error(e, Operation::EditIssue, key))?;

        tracing::info!("Updated issue {}", key);
        BaseToolImpl::create_success_response(&issue)
    }
}

//! Issue creation tool for MCP operations
//!
//! This module provides the CreateIssueTool for creating new Jira issues through the MCP protocol.

use crate::error::ToolError;
use crate::jira::CreateIssueFields;
use crate::mcp::binder::{ArgumentKind, ArgumentSpec};
use crate::mcp::envelope::ResultEnvelope;
use crate::mcp::shared_utils::{McpErrorHandler, Operation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required(
        "project_key",
        ArgumentKind::String,
        "The project key where the issue will be created",
    ),
    ArgumentSpec::required(
        "summary",
        ArgumentKind::String,
        "The summary/title of the issue",
    ),
    ArgumentSpec::required(
        "description",
        ArgumentKind::String,
        "The description of the issue",
    ),
    ArgumentSpec::required(
        "issue_type",
        ArgumentKind::String,
        "The type of the issue (e.g. 'Bug' 'Task' 'Story')",
    ),
    ArgumentSpec::optional(
        "parent",
        ArgumentKind::String,
        "The parent issue key (optional)",
    ),
];

/// Request structure for creating an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateIssueRequest {
    /// Project the issue is created in
    pub project_key: String,
    /// One line summary
    pub summary: String,
    /// Free text description
    pub description: String,
    /// Issue type name
    pub issue_type: String,
    /// Parent issue key; empty means none
    #[serde(default)]
    pub parent: Option<String>,
}

impl CreateIssueRequest {
    /// Fields sent to Jira, with the parent linked only when non-empty
    pub fn to_fields(&self) -> CreateIssueFields {
        let fields = CreateIssueFields::new(
            &self.project_key,
            &self.summary,
            &self.description,
            &self.issue_type,
        );

        match self.parent.as_deref().map(str::trim) {
            Some(parent) if !parent.is_empty() => fields.with_parent(parent),
            _ => fields,
        }
    }
}

/// Tool for creating new issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "create_jira_issue"
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
        let request: CreateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let fields = request.to_fields();

        tracing::debug!(
            "Creating {} in {} (parent: {:?})",
            request.issue_type,
            request.project_key,
            fields.parent.as_ref().and_then(|p| p.key.as_deref())
        );

        let issue = context
            .client
            .create_issue(&fields)
            .await
            .map_err(|e| {
                McpErrorHandler::handle_jira_error(e, Operation::CreateIssue, &request.project_key)
            })?;

        tracing::info!("Created issue {}", issue.key);
        BaseToolImpl::create_success_response(&issue)
    }
}

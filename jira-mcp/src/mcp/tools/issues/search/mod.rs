//! Issue search tool for MCP operations
//!
//! This module provides the SearchIssueTool for running JQL queries through the MCP protocol.

use crate::error::ToolError;
use crate::jira::{DEFAULT_MAX_RESULTS, SEARCH_ISSUE_FIELDS};
use crate::mcp::binder::{ArgumentKind, ArgumentSpec, DefaultValue};
use crate::mcp::envelope::ResultEnvelope;
use crate::mcp::shared_utils::{McpErrorHandler, McpValidation, Operation};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec::required(
        "jql",
        ArgumentKind::String,
        "JQL query string to search issues",
    ),
    ArgumentSpec::optional(
        "max_results",
        ArgumentKind::Integer,
        "Maximum number of results to return (default: 50)",
    )
    .with_default(DefaultValue::Integer(DEFAULT_MAX_RESULTS)),
];

/// Request structure for searching issues
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchIssueRequest {
    /// JQL query
    pub jql: String,
    /// Result limit
    #[serde(default = "default_max_results")]
    pub max_results: u64,
}

fn default_max_results() -> u64 {
    DEFAULT_MAX_RESULTS
}

/// Tool for searching issues with JQL
#[derive(Default)]
pub struct SearchIssueTool;

impl SearchIssueTool {
    /// Creates a new instance of the SearchIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssueTool {
    fn name(&self) -> &'static str {
        "search_jira_issue"
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
        let request: SearchIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let jql = McpValidation::validate_not_empty(&request.jql, "jql")?;

        tracing::debug!("Searching issues (limit {}): {}", request.max_results, jql);

        let issues = context
            .client
            .search_issues(jql, request.max_results, SEARCH_ISSUE_FIELDS)
            .await
            .map_err(|e| McpErrorHandler::handle_jira_error(e, Operation::SearchIssues, jql))?;

        tracing::info!("Search returned {} issues", issues.len());
        BaseToolImpl::create_success_response(&issues)
    }
}

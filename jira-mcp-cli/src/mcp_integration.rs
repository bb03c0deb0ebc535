//! Integration layer for calling MCP tools from CLI commands
//!
//! The `call` command goes through the same [`McpServer`] dispatch path an
//! MCP host uses, so binding, error mapping and envelopes are identical.

use jira_mcp::{JiraConfig, McpServer, ResultEnvelope};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use crate::signal_handler::cancel_on_shutdown;

/// CLI-side handle on a fully configured tool server
pub struct CliToolContext {
    server: McpServer,
}

impl CliToolContext {
    /// Build the server from `JIRA_*` environment variables
    pub fn from_env() -> CliResult<Self> {
        let config = JiraConfig::from_env()?;
        Self::from_config(&config)
    }

    /// Build the server for an already loaded configuration
    pub fn from_config(config: &JiraConfig) -> CliResult<Self> {
        let server = McpServer::from_config(config)?;
        Ok(Self { server })
    }

    /// Wrap an existing server, used with a mock client in tests
    pub fn from_server(server: McpServer) -> Self {
        Self { server }
    }

    /// Execute an MCP tool, abandoning it when `cancel` fires
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        arguments: Map<String, Value>,
        cancel: &CancellationToken,
    ) -> ResultEnvelope {
        self.server
            .call_tool_with_cancellation(tool_name, arguments, cancel)
            .await
    }

    /// Check if a tool exists
    pub fn has_tool(&self, tool_name: &str) -> bool {
        self.server.tool_registry().get_tool(tool_name).is_some()
    }
}

/// Parse the `--args` value into a JSON object
pub fn parse_arguments(raw: &str) -> CliResult<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::new(format!("--args is not valid JSON: {e}"), EXIT_ERROR))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::new(
            format!(
                "--args must be a JSON object, got {}",
                jira_mcp::mcp::binder::describe(&other)
            ),
            EXIT_ERROR,
        )),
    }
}

/// Main entry point for the call command
///
/// Prints the envelope body to stdout. A failure envelope is a normal
/// outcome and maps to exit code 1 rather than an error.
pub async fn run_call_command(tool: String, raw_args: String) -> CliResult<i32> {
    let arguments = parse_arguments(&raw_args)?;
    let context = CliToolContext::from_env()?;

    let cancel = CancellationToken::new();
    cancel_on_shutdown(cancel.clone());

    let envelope = context.execute_tool(&tool, arguments, &cancel).await;
    cancel.cancel();
    println!("{}", envelope.text());

    Ok(exit_code_for(&envelope))
}

fn exit_code_for(envelope: &ResultEnvelope) -> i32 {
    if envelope.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_WARNING
    }
}

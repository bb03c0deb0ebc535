use jira_mcp::{JiraConfig, McpServer};
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;

use crate::error::{CliError, CliResult};
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use crate::signal_handler::cancel_on_shutdown;

/// Serve the Jira tools over stdio until the host disconnects or a shutdown signal arrives
///
/// Configuration is validated before the transport starts so a broken
/// environment fails fast with exit code 2.
pub async fn run_server() -> CliResult<i32> {
    let config = JiraConfig::from_env()?;
    let server = McpServer::from_config(&config)?;

    tracing::info!(
        "MCP server initialized with {} tools",
        server.tool_registry().len()
    );

    let ct = CancellationToken::new();
    cancel_on_shutdown(ct.clone());

    let running = serve_server(server, stdio())
        .await
        .map_err(|e| CliError::new(format!("MCP server error: {e}"), EXIT_WARNING))?;
    tracing::info!("MCP server started successfully");

    let code = tokio::select! {
        result = running.waiting() => match result {
            Ok(_) => {
                tracing::info!("MCP host disconnected");
                EXIT_SUCCESS
            }
            Err(e) => {
                tracing::error!("MCP server task failed: {}", e);
                EXIT_WARNING
            }
        },
        _ = ct.cancelled() => EXIT_SUCCESS,
    };

    ct.cancel();
    tracing::info!("MCP server exited");
    Ok(code)
}

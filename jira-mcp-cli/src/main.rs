use std::process;

use clap::CommandFactory;
use is_terminal::IsTerminal;
use jira_mcp_cli::cli::{Cli, Commands};
use jira_mcp_cli::doctor::Doctor;
use jira_mcp_cli::error::handle_cli_result;
use jira_mcp_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use jira_mcp_cli::logging::{init_logging, log_level};
use jira_mcp_cli::{mcp_integration, server, tools};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help
    let Some(command) = cli.command else {
        let code = match Cli::command().print_help() {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_ERROR,
        };
        process::exit(code);
    };

    let is_mcp_mode = matches!(command, Commands::Serve) && !std::io::stdin().is_terminal();
    init_logging(
        log_level(is_mcp_mode, cli.quiet, cli.debug, cli.verbose),
        is_mcp_mode,
    );

    let exit_code = match command {
        Commands::Serve => {
            tracing::info!("Starting MCP server");
            handle_cli_result(server::run_server().await)
        }
        Commands::Doctor => {
            tracing::info!("Running diagnostics");
            Doctor::new().run_diagnostics().await
        }
        Commands::Tools { format } => {
            tracing::debug!("Listing tools as {:?}", format);
            handle_cli_result(tools::run_tools_command(format))
        }
        Commands::Call { tool, args } => {
            tracing::debug!("Calling tool {}", tool);
            handle_cli_result(mcp_integration::run_call_command(tool, args).await)
        }
    };

    process::exit(exit_code);
}

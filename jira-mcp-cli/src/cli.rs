use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::io;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "jira-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing Jira issues as tools")]
#[command(long_about = "
jira-mcp is an MCP (Model Context Protocol) server that lets an AI host
read, create, search and edit Jira issues through four typed tools.

Connection settings are read from the environment:
  JIRA_URL           Base URL of the Jira site
  JIRA_USERNAME      Account used for basic authentication
  JIRA_API_TOKEN     API token for that account
  JIRA_TIMEOUT_SECS  Request timeout in seconds (optional, default 30)

Example usage:
  jira-mcp serve     # Run as MCP server
  jira-mcp tools     # List the tools the server exposes
  jira-mcp doctor    # Check configuration and connectivity
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server over stdio
    #[command(long_about = "
Runs jira-mcp as an MCP server on stdin/stdout. The server will:

- Read Jira connection settings from the environment
- Expose get_jira_issue, create_jira_issue, search_jira_issue and
  edit_jira_issue as MCP tools
- Answer every tool call with a success payload or a structured error

When stdin is not a terminal, logs are written to ~/.jira-mcp/mcp.log
(override the file name with JIRA_MCP_LOG_FILE).

Example:
  jira-mcp serve
  # Or configure in your MCP host's server settings
")]
    Serve,
    /// Diagnose configuration and connectivity issues
    #[command(long_about = "
Runs diagnostics to help troubleshoot setup issues.
The doctor command will check:

- If jira-mcp is in your PATH
- The log directory used in server mode
- JIRA_URL, JIRA_USERNAME and JIRA_API_TOKEN
- That the Jira site answers with the configured credentials

Exit codes:
  0 - All checks passed
  1 - Warnings found
  2 - Errors found

Example:
  jira-mcp doctor
")]
    Doctor,
    /// List the tools exposed by the server
    #[command(long_about = "
Lists every tool the MCP server registers, in registration order, with
its description and declared arguments.

Output formats:
  table  - Formatted table (default)
  json   - JSON output for scripting
  yaml   - YAML output for scripting

Examples:
  jira-mcp tools
  jira-mcp tools --format json
")]
    Tools {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Invoke a single tool and print its result envelope
    #[command(long_about = "
Dispatches one tool call against the configured Jira site, exactly as an
MCP host would, and prints the resulting envelope as JSON.

Exit codes:
  0 - The tool succeeded
  1 - The tool returned a failure envelope
  2 - Invalid input or configuration

Examples:
  jira-mcp call get_jira_issue --args '{\"issue_key\": \"PROJ-1\"}'
  jira-mcp call search_jira_issue --args '{\"jql\": \"project = PROJ\", \"max_results\": 5}'
")]
    Call {
        /// Name of the tool to invoke
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_help_works() {
        let result = Cli::try_parse_from_args(["jira-mcp", "--help"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_works() {
        let result = Cli::try_parse_from_args(["jira-mcp", "--version"]);
        assert!(result.is_err());

        let error = result.unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_no_subcommand() {
        let cli = Cli::try_parse_from_args(["jira-mcp"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.debug);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_serve_subcommand() {
        let cli = Cli::try_parse_from_args(["jira-mcp", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_cli_doctor_subcommand() {
        let cli = Cli::try_parse_from_args(["jira-mcp", "doctor"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Doctor)));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from_args(["jira-mcp", "--debug", "--quiet", "serve"]).unwrap();
        assert!(cli.debug);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_cli_tools_default_format() {
        let cli = Cli::try_parse_from_args(["jira-mcp", "tools"]).unwrap();
        match cli.command {
            Some(Commands::Tools { format }) => assert_eq!(format, OutputFormat::Table),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_tools_yaml_format() {
        let cli = Cli::try_parse_from_args(["jira-mcp", "tools", "--format", "yaml"]).unwrap();
        match cli.command {
            Some(Commands::Tools { format }) => assert_eq!(format, OutputFormat::Yaml),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_tools_rejects_unknown_format() {
        let result = Cli::try_parse_from_args(["jira-mcp", "tools", "--format", "xml"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::InvalidValue
        );
    }

    #[test]
    fn test_cli_call_subcommand() {
        let cli = Cli::try_parse_from_args([
            "jira-mcp",
            "call",
            "get_jira_issue",
            "--args",
            r#"{"issue_key":"PROJ-1"}"#,
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Call { tool, args }) => {
                assert_eq!(tool, "get_jira_issue");
                assert_eq!(args, r#"{"issue_key":"PROJ-1"}"#);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_call_defaults_to_empty_object() {
        let cli = Cli::try_parse_from_args(["jira-mcp", "call", "get_jira_issue"]).unwrap();
        match cli.command {
            Some(Commands::Call { args, .. }) => assert_eq!(args, "{}"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_call_requires_tool_name() {
        let result = Cli::try_parse_from_args(["jira-mcp", "call"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_invalid_subcommand() {
        let result = Cli::try_parse_from_args(["jira-mcp", "invalid"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::InvalidSubcommand
        );
    }
}

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliResult, IntoCliResult};
use crate::exit_codes::EXIT_SUCCESS;
use colored::Colorize;
use jira_mcp::mcp::binder::{ArgumentSpec, DefaultValue};
use jira_mcp::mcp::{register_issue_tools, McpTool};
use jira_mcp::ToolRegistry;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Style},
    Table, Tabled,
};

/// One row of the table output
#[derive(Tabled, Serialize)]
struct ToolRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Arguments")]
    arguments: String,
}

/// Full tool description used for JSON and YAML output
#[derive(Debug, Serialize, PartialEq)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub arguments: Vec<ArgumentInfo>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ArgumentInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    pub description: String,
}

impl ArgumentInfo {
    fn from_spec(spec: &ArgumentSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            kind: spec.kind.schema_type().to_string(),
            required: spec.required,
            default: spec.default.map(|default| match default {
                DefaultValue::String(s) => serde_json::Value::from(s),
                DefaultValue::Integer(n) => serde_json::Value::from(n),
                DefaultValue::Boolean(b) => serde_json::Value::from(b),
            }),
            description: spec.description.to_string(),
        }
    }
}

impl ToolInfo {
    fn from_tool(tool: &dyn McpTool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().trim().to_string(),
            arguments: tool
                .arguments()
                .iter()
                .map(ArgumentInfo::from_spec)
                .collect(),
        }
    }

    /// First non-empty line of the description, without markdown heading marks
    fn summary(&self) -> &str {
        self.description
            .lines()
            .map(|line| line.trim_start_matches('#').trim())
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }

    fn argument_list(&self) -> String {
        self.arguments
            .iter()
            .map(|arg| {
                if arg.required {
                    format!("{}*", arg.name)
                } else {
                    arg.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Describe every registered tool in registration order
pub fn collect_tool_infos() -> CliResult<Vec<ToolInfo>> {
    let mut registry = ToolRegistry::new();
    register_issue_tools(&mut registry).cli_general_error()?;

    Ok(registry
        .list_tool_names()
        .iter()
        .filter_map(|name| registry.get_tool(name))
        .map(ToolInfo::from_tool)
        .collect())
}

/// Main entry point for the tools command
pub fn run_tools_command(format: OutputFormat) -> CliResult<i32> {
    let infos = collect_tool_infos()?;
    print!("{}", render(&infos, format, Cli::should_use_color())?);
    Ok(EXIT_SUCCESS)
}

fn render(infos: &[ToolInfo], format: OutputFormat, use_color: bool) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(infos).cli_general_error()?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Yaml => serde_yaml::to_string(infos).cli_general_error(),
        OutputFormat::Table => Ok(render_table(infos, use_color)),
    }
}

fn render_table(infos: &[ToolInfo], use_color: bool) -> String {
    let rows: Vec<ToolRow> = infos
        .iter()
        .map(|info| ToolRow {
            name: info.name.clone(),
            description: info.summary().to_string(),
            arguments: info.argument_list(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());

    if use_color {
        table.with(Modify::new(Rows::one(0)).with(Color::FG_BRIGHT_CYAN));
    }

    table.with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    let mut output = format!("{table}\n");
    if use_color {
        output.push_str(&format!("\n  {} Required argument\n", "*".red()));
    }
    output
}

// `noteloom tools` and `noteloom call`: the raw tool-call surface an agent
// host drives.

use anyhow::Context;
use clap::Args;
use noteloom_common::protocol::{tool_definitions, ToolCall, ToolDefinition, ToolResponse};
use noteloom_store::tools::execute;
use serde_json::Value;

use crate::exit_code::ToolFailure;
use crate::output::{self, OutputFormat};
use crate::workspace::WorkspaceArgs;

#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Tool name, e.g. `replace_lines`.
    pub tool: String,

    /// Arguments as a JSON object.
    #[arg(default_value = "{}")]
    pub arguments: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

pub fn run_tools(args: ToolsArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    output::finish(format, Ok(tool_definitions()), |definitions| format_tools_human(definitions))
}

/// Always prints the `ToolResponse` envelope as JSON; a failed call also
/// fails the process with the mapped exit code.
pub fn run_call(args: CallArgs) -> anyhow::Result<()> {
    let prepared =
        parse_arguments(&args.arguments).and_then(|arguments| Ok((args.workspace.open()?, arguments)));
    let response = match prepared {
        Ok((repo, arguments)) => execute(&repo, &ToolCall::new(args.tool, arguments)),
        Err(error) => {
            output::print_anyhow_error(OutputFormat::Json, &error);
            return Err(error);
        }
    };

    output::print_output(OutputFormat::Json, &response, |_| String::new())?;
    into_result(response)
}

fn parse_arguments(raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw)
        .map_err(|error| ToolFailure {
            code: "VALIDATION_FAILED".to_string(),
            message: format!("arguments are not valid JSON: {error}"),
        })
        .context("failed to parse tool arguments")
}

fn into_result(response: ToolResponse) -> anyhow::Result<()> {
    match response.error {
        Some(error) if !response.ok => {
            Err(ToolFailure { code: error.code, message: error.message }.into())
        }
        _ => Ok(()),
    }
}

fn format_tools_human(definitions: &[ToolDefinition]) -> String {
    let mut lines = Vec::new();
    for definition in definitions {
        let required = definition.required();
        lines.push(format!("{}({})", definition.name, required.join(", ")));
        lines.push(format!("  {}", definition.description));
    }
    lines.join("\n")
}

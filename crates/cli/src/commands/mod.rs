// CLI subcommand dispatch.

use std::io::{IsTerminal, Read};

use anyhow::Context;
use clap::{Args, Subcommand};

pub mod call;
pub mod create;
pub mod edit;
pub mod read;
pub mod search;

#[derive(Subcommand)]
pub enum Command {
    /// Read a numbered range of body lines
    ReadLines(read::ReadLinesArgs),
    /// Replace a range of body lines
    ReplaceLines(edit::ReplaceLinesArgs),
    /// Insert lines after a given line (0 prepends)
    InsertLines(edit::InsertLinesArgs),
    /// Delete a range of body lines
    DeleteLines(edit::DeleteLinesArgs),
    /// Overwrite a note body, keeping its metadata
    Update(edit::UpdateArgs),
    /// Create a note from a title
    Create(create::CreateArgs),
    /// Read a whole note with metadata and tags
    Read(read::ReadArgs),
    /// Search notes by content, title, or `tag:<name>`
    Search(search::SearchArgs),
    /// List tool definitions as JSON schema
    Tools(call::ToolsArgs),
    /// Run a raw tool call with JSON arguments
    Call(call::CallArgs),
}

pub fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::ReadLines(args) => read::run_read_lines(args),
        Command::ReplaceLines(args) => edit::run_replace(args),
        Command::InsertLines(args) => edit::run_insert(args),
        Command::DeleteLines(args) => edit::run_delete(args),
        Command::Update(args) => edit::run_update(args),
        Command::Create(args) => create::run(args),
        Command::Read(args) => read::run_read(args),
        Command::Search(args) => search::run(args),
        Command::Tools(args) => call::run_tools(args),
        Command::Call(args) => call::run_call(args),
    }
}

/// Where new text comes from: `--content`, `--file`, or stdin when neither
/// is given.
#[derive(Debug, Clone, Default, Args)]
pub struct ContentArgs {
    /// Text to write.
    #[arg(long, group = "content_source", allow_hyphen_values = true)]
    pub content: Option<String>,

    /// Read the text from a file (`-` for stdin).
    #[arg(long, group = "content_source")]
    pub file: Option<String>,
}

impl ContentArgs {
    /// The text, or `None` when no source was given and stdin is a terminal.
    pub fn resolve_optional(&self) -> anyhow::Result<Option<String>> {
        match (&self.content, self.file.as_deref()) {
            (Some(content), _) => Ok(Some(content.clone())),
            (None, Some(path)) if path != "-" => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("failed to read content file `{path}`")),
            (None, Some(_)) => read_stdin().map(Some),
            (None, None) if std::io::stdin().is_terminal() => Ok(None),
            (None, None) => read_stdin().map(Some),
        }
    }

    pub fn resolve(&self) -> anyhow::Result<String> {
        self.resolve_optional()?
            .ok_or_else(|| anyhow::anyhow!("either --content or --file is required"))
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        TestCli::try_parse_from(std::iter::once("noteloom").chain(args.iter().copied()))
            .expect("arguments should parse")
            .command
    }

    #[test]
    fn content_flag_wins() {
        let args = ContentArgs { content: Some("x".into()), file: None };
        assert_eq!(args.resolve().unwrap(), "x");
    }

    #[test]
    fn content_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("body.txt");
        std::fs::write(&path, "from file").unwrap();
        let args = ContentArgs { content: None, file: Some(path.display().to_string()) };
        assert_eq!(args.resolve().unwrap(), "from file");
    }

    #[test]
    fn missing_content_file_is_an_error() {
        let args = ContentArgs { content: None, file: Some("/nonexistent/body.txt".into()) };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn subcommands_use_kebab_case() {
        assert!(matches!(
            parse(&["read-lines", "inbox/today", "1", "3"]),
            Command::ReadLines(_)
        ));
        assert!(matches!(
            parse(&["replace-lines", "n", "2", "2", "--content", "B"]),
            Command::ReplaceLines(_)
        ));
        assert!(matches!(parse(&["insert-lines", "n", "0", "--content", "X"]), Command::InsertLines(_)));
        assert!(matches!(parse(&["delete-lines", "n", "1", "1"]), Command::DeleteLines(_)));
        assert!(matches!(parse(&["update", "n", "--content", ""]), Command::Update(_)));
        assert!(matches!(parse(&["create", "Title"]), Command::Create(_)));
        assert!(matches!(parse(&["search", "tag:idea"]), Command::Search(_)));
        assert!(matches!(parse(&["call", "read_note", "{}"]), Command::Call(_)));
        assert!(matches!(parse(&["tools"]), Command::Tools(_)));
    }

    #[test]
    fn content_and_file_conflict() {
        let result = TestCli::try_parse_from([
            "noteloom", "update", "n", "--content", "x", "--file", "y",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn root_flag_is_accepted_per_command() {
        let Command::Read(args) = parse(&["read", "n", "--root", "/kb"]) else {
            panic!("expected read");
        };
        assert_eq!(args.workspace.root.as_deref(), Some(std::path::Path::new("/kb")));
    }
}

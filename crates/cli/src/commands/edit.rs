// `noteloom replace-lines|insert-lines|delete-lines|update`: body mutations.
//
// Each prints the mutation message and a marked diff (or the full
// `MutationResult` as JSON).

use anyhow::Context;
use clap::Args;

use crate::commands::ContentArgs;
use crate::output::{self, OutputFormat};
use crate::workspace::WorkspaceArgs;

/// Flags shared by every mutating command.
#[derive(Debug, Args)]
pub struct MutationArgs {
    /// Refuse the edit unless the file's SHA-256 still matches.
    #[arg(long)]
    pub expected_hash: Option<String>,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Force JSON output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ReplaceLinesArgs {
    /// Note identifier (relative path, `.md` optional).
    pub note: String,
    /// First line to replace (1-based).
    pub start_line: usize,
    /// Last line to replace, inclusive; clamped to the end of the note.
    pub end_line: usize,
    #[command(flatten)]
    pub content: ContentArgs,
    #[command(flatten)]
    pub common: MutationArgs,
}

#[derive(Debug, Args)]
pub struct InsertLinesArgs {
    /// Note identifier (relative path, `.md` optional).
    pub note: String,
    /// Insert after this line; 0 inserts before the first line.
    pub after_line: usize,
    #[command(flatten)]
    pub content: ContentArgs,
    #[command(flatten)]
    pub common: MutationArgs,
}

#[derive(Debug, Args)]
pub struct DeleteLinesArgs {
    /// Note identifier (relative path, `.md` optional).
    pub note: String,
    /// First line to delete (1-based).
    pub start_line: usize,
    /// Last line to delete, inclusive; clamped to the end of the note.
    pub end_line: usize,
    #[command(flatten)]
    pub common: MutationArgs,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Note identifier (relative path, `.md` optional).
    pub note: String,
    #[command(flatten)]
    pub content: ContentArgs,
    #[command(flatten)]
    pub common: MutationArgs,
}

pub fn run_replace(args: ReplaceLinesArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.common.json);
    let result = args.content.resolve().and_then(|text| {
        let repo = args.common.workspace.open()?;
        repo.replace_lines(
            &args.note,
            args.start_line,
            args.end_line,
            &text,
            args.common.expected_hash.as_deref(),
        )
        .with_context(|| format!("failed to replace lines in `{}`", args.note))
    });
    output::finish(format, result, output::render_mutation)
}

pub fn run_insert(args: InsertLinesArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.common.json);
    let result = args.content.resolve().and_then(|text| {
        let repo = args.common.workspace.open()?;
        repo.insert_lines(&args.note, args.after_line, &text, args.common.expected_hash.as_deref())
            .with_context(|| format!("failed to insert lines into `{}`", args.note))
    });
    output::finish(format, result, output::render_mutation)
}

pub fn run_delete(args: DeleteLinesArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.common.json);
    let result = args.common.workspace.open().and_then(|repo| {
        repo.delete_lines(
            &args.note,
            args.start_line,
            args.end_line,
            args.common.expected_hash.as_deref(),
        )
        .with_context(|| format!("failed to delete lines from `{}`", args.note))
    });
    output::finish(format, result, output::render_mutation)
}

pub fn run_update(args: UpdateArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.common.json);
    let result = args.content.resolve().and_then(|text| {
        let repo = args.common.workspace.open()?;
        repo.update_note(&args.note, &text, args.common.expected_hash.as_deref())
            .with_context(|| format!("failed to update `{}`", args.note))
    });
    output::finish(format, result, output::render_mutation)
}

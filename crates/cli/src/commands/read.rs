// `noteloom read-lines` and `noteloom read`: non-mutating note access.

use anyhow::Context;
use clap::Args;
use noteloom_common::frontmatter::MetaValue;
use noteloom_common::types::{LineSlice, NoteDocument};

use crate::output::{self, OutputFormat};
use crate::workspace::WorkspaceArgs;

#[derive(Debug, Args)]
pub struct ReadLinesArgs {
    /// Note identifier (relative path, `.md` optional).
    pub note: String,

    /// First line (1-based).
    pub start_line: usize,

    /// Last line, inclusive; clamped to the end of the note.
    pub end_line: usize,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Note identifier (relative path, `.md` optional).
    pub note: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

pub fn run_read_lines(args: ReadLinesArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = args.workspace.open().and_then(|repo| {
        repo.read_lines(&args.note, args.start_line, args.end_line)
            .with_context(|| format!("failed to read lines of `{}`", args.note))
    });
    output::finish(format, result, format_lines_human)
}

pub fn run_read(args: ReadArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = args.workspace.open().and_then(|repo| {
        repo.read_note(&args.note).with_context(|| format!("failed to read `{}`", args.note))
    });
    output::finish(format, result, format_note_human)
}

fn format_lines_human(slice: &LineSlice) -> String {
    let width = slice.end_line.to_string().len();
    let mut lines = vec![format!(
        "# {} (lines {}-{} of {})",
        slice.note_id, slice.start_line, slice.end_line, slice.total_lines
    )];
    for line in &slice.lines {
        lines.push(format!("{:>width$} | {}", line.line, line.content));
    }
    lines.join("\n")
}

fn format_note_human(note: &NoteDocument) -> String {
    let mut lines = vec![format!("# {}", note.id)];
    for (key, value) in note.metadata.iter() {
        let rendered = match value {
            MetaValue::Text(text) => text.clone(),
            MetaValue::List(items) => format!("[{}]", items.join(", ")),
        };
        lines.push(format!("{key}: {rendered}"));
    }
    if !note.tags.is_empty() {
        let tags: Vec<String> = note.tags.iter().map(|tag| format!("#{tag}")).collect();
        lines.push(format!("tags: {}", tags.join(" ")));
    }
    lines.push(String::new());
    lines.push(note.content.clone());
    lines.join("\n")
}

// `noteloom search`: find notes by content, title, or tag.

use anyhow::Context;
use clap::Args;
use noteloom_common::types::SearchHit;

use crate::output::{self, OutputFormat};
use crate::workspace::WorkspaceArgs;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query; prefix with `tag:` to match tags only.
    pub query: String,

    /// Limit results.
    #[arg(long, default_value = "20")]
    limit: usize,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

pub fn run(args: SearchArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = args.workspace.open().and_then(|repo| {
        let mut hits = repo
            .search_notes(&args.query)
            .with_context(|| format!("search for `{}` failed", args.query))?;
        hits.truncate(args.limit);
        Ok(hits)
    });
    output::finish(format, result, |hits| format_human(hits))
}

fn format_human(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No results found.".to_string();
    }

    let mut lines = Vec::new();
    for hit in hits {
        lines.push(format!("{} ({})", hit.path, hit.title));
        for snippet in &hit.snippets {
            lines.push(format!("  {snippet}"));
        }
        if !hit.tags.is_empty() {
            let tags: Vec<String> = hit.tags.iter().map(|tag| format!("#{tag}")).collect();
            lines.push(format!("  tags: {}", tags.join(" ")));
        }
    }
    lines.join("\n")
}

// `noteloom create`: new note whose file name is derived from its title.

use anyhow::Context;
use clap::Args;

use crate::commands::ContentArgs;
use crate::output::{self, OutputFormat};
use crate::workspace::WorkspaceArgs;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Note title; becomes the first heading and the file name.
    pub title: String,

    #[command(flatten)]
    pub content: ContentArgs,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

pub fn run(args: CreateArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = args.content.resolve_optional().and_then(|content| {
        let repo = args.workspace.open()?;
        repo.create_note(&args.title, &content.unwrap_or_default())
            .with_context(|| format!("failed to create note `{}`", args.title))
    });
    output::finish(format, result, output::render_mutation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_file_named_after_title() {
        let tmp = tempfile::tempdir().unwrap();
        run(CreateArgs {
            title: "Reading List".into(),
            content: ContentArgs { content: Some("- Dune".into()), file: None },
            workspace: WorkspaceArgs { root: Some(tmp.path().to_path_buf()) },
            json: true,
        })
        .unwrap();
        let written = std::fs::read_to_string(tmp.path().join("Reading_List.md")).unwrap();
        assert_eq!(written, "# Reading List\n\n- Dune");
    }
}

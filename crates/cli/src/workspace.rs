// Workspace root selection shared by every subcommand.
//
// Precedence: `--root`, then `NOTELOOM_ROOT`, then `workspace_root` from
// `~/.noteloom/config.toml`, then the current directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use noteloom_store::{NoteRepository, NoteloomConfig};
use tracing::debug;

pub const ROOT_ENV: &str = "NOTELOOM_ROOT";

#[derive(Debug, Clone, Default, Args)]
pub struct WorkspaceArgs {
    /// Workspace root directory.
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl WorkspaceArgs {
    pub fn open(&self) -> anyhow::Result<NoteRepository> {
        let config = NoteloomConfig::load();
        let env_root = std::env::var_os(ROOT_ENV).map(PathBuf::from);
        let root = select_root(self.root.clone(), env_root, &config)
            .map_or_else(std::env::current_dir, Ok)
            .context("failed to determine the current directory")?;
        debug!(root = %root.display(), "opening workspace");

        NoteRepository::from_config(&root, &config)
            .with_context(|| format!("failed to open workspace `{}`", root.display()))
    }
}

fn select_root(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    config: &NoteloomConfig,
) -> Option<PathBuf> {
    flag.or(env.filter(|path| !path.as_os_str().is_empty()))
        .or_else(|| config.workspace_root.clone())
}

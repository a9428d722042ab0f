//! `skyctl docs`: search and browse the published documentation.

use clap::{Args, Subcommand};
use skyctl_docs::{DocsConfig, DocsIndex};

pub mod list;
pub mod output;
pub mod rebuild;
pub mod search;
pub mod show;

#[derive(Args, Debug, Clone)]
pub struct DocsArgs {
    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Documentation manifest (llms.txt) to read. Overrides SKYCTL_DOCS_MANIFEST_URL"
    )]
    pub manifest_url: Option<String>,

    #[command(subcommand)]
    pub command: DocsCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DocsCommands {
    /// 🔎 Search the documentation
    Search(search::SearchArgs),
    /// 📖 List every page in the documentation manifest
    List(list::ListArgs),
    /// 📄 Print one documentation page
    Show(show::ShowArgs),
    /// 🔄 Rebuild the documentation index and print its stats
    Rebuild(rebuild::RebuildArgs),
}

pub async fn run(args: DocsArgs) -> i32 {
    let DocsArgs {
        manifest_url,
        command,
    } = args;
    match command {
        DocsCommands::Search(args) => search::run(manifest_url, args).await,
        DocsCommands::List(args) => list::run(manifest_url, args).await,
        DocsCommands::Show(args) => show::run(manifest_url, args).await,
        DocsCommands::Rebuild(args) => rebuild::run(manifest_url, args).await,
    }
}

/// Environment configuration with the command-line override applied.
pub fn load_config(manifest_url: Option<String>) -> Result<DocsConfig, String> {
    let mut config = DocsConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(url) = manifest_url {
        config.manifest_url = url;
    }
    tracing::debug!(manifest = %config.manifest_url, "Loaded documentation config");
    Ok(config)
}

pub fn open_index(config: &DocsConfig) -> Result<DocsIndex, String> {
    DocsIndex::new(config).map_err(|e| format!("Failed to create documentation index: {e}"))
}

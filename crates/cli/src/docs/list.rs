use clap::Args;
use skyctl_docs::CatalogEntry;

use super::output::{OutputFormat, print_json, render_catalog};
use super::{load_config, open_index};
use crate::common::run_cli_async;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, value_name = "NAME", help = "Only list pages in this section")]
    pub section: Option<String>,

    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

pub async fn run(manifest_url: Option<String>, args: ListArgs) -> i32 {
    run_cli_async(|| run_inner(manifest_url, args)).await
}

async fn run_inner(manifest_url: Option<String>, args: ListArgs) -> Result<(), String> {
    let config = load_config(manifest_url)?;
    let index = open_index(&config)?;

    let catalog = index.catalog().await.map_err(|e| e.to_string())?;
    let entries = filter_section(catalog, args.section.as_deref());

    match args.output {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Table => {
            print!("{}", render_catalog(&entries));
            Ok(())
        }
    }
}

/// Section names compare case-insensitively.
fn filter_section(entries: Vec<CatalogEntry>, section: Option<&str>) -> Vec<CatalogEntry> {
    let Some(section) = section.map(str::trim) else {
        return entries;
    };
    entries
        .into_iter()
        .filter(|entry| entry.section.eq_ignore_ascii_case(section))
        .collect()
}

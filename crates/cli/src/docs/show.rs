use clap::Args;
use skyctl_docs::{ContentSource, HttpFetcher};

use super::load_config;
use crate::common::run_cli_async;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(value_name = "URL", help = "Page URL, as printed by `skyctl docs search`")]
    pub url: String,
}

pub async fn run(manifest_url: Option<String>, args: ShowArgs) -> i32 {
    run_cli_async(|| run_inner(manifest_url, args)).await
}

async fn run_inner(manifest_url: Option<String>, args: ShowArgs) -> Result<(), String> {
    let config = load_config(manifest_url)?;
    let fetcher = HttpFetcher::new(&config).map_err(|e| e.to_string())?;

    let page = fetcher.fetch(&args.url).await.map_err(|e| e.to_string())?;
    println!("{}", page.trim_end());
    Ok(())
}

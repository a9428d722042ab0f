use clap::Args;
use tracing::debug;

use super::output::{OutputFormat, print_json, render_results};
use super::{load_config, open_index};
use crate::common::{run_cli_async, spinner};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[arg(value_name = "QUERY", required = true, num_args = 1.., help = "Words to search for")]
    pub words: Vec<String>,

    #[arg(long, short = 'n', default_value_t = 10, help = "Maximum number of results")]
    pub limit: usize,

    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl SearchArgs {
    pub fn query(&self) -> String {
        self.words.join(" ")
    }
}

pub async fn run(manifest_url: Option<String>, args: SearchArgs) -> i32 {
    run_cli_async(|| run_inner(manifest_url, args)).await
}

async fn run_inner(manifest_url: Option<String>, args: SearchArgs) -> Result<(), String> {
    let config = load_config(manifest_url)?;
    let index = open_index(&config)?;
    let query = args.query();

    let build_spinner = spinner("📚 Indexing documentation...");
    let built = index.ensure_indexed().await;
    build_spinner.finish_and_clear();
    built.map_err(|e| e.to_string())?;
    debug!(query = %query, limit = args.limit, "Searching documentation");

    let results = index
        .search(&query, args.limit)
        .await
        .map_err(|e| e.to_string())?;

    match args.output {
        OutputFormat::Json => print_json(&results),
        OutputFormat::Table => {
            print!("{}", render_results(&query, &results));
            Ok(())
        }
    }
}

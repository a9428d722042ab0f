use std::time::Instant;

use clap::Args;

use super::output::{OutputFormat, print_json, render_stats};
use super::{load_config, open_index};
use crate::common::{format_elapsed_ms, run_cli_async, spinner};

#[derive(Args, Debug, Clone, Copy)]
pub struct RebuildArgs {
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

pub async fn run(manifest_url: Option<String>, args: RebuildArgs) -> i32 {
    run_cli_async(|| run_inner(manifest_url, args)).await
}

async fn run_inner(manifest_url: Option<String>, args: RebuildArgs) -> Result<(), String> {
    let config = load_config(manifest_url)?;
    let index = open_index(&config)?;

    let start = Instant::now();
    let rebuild_spinner = spinner("🔄 Rebuilding documentation index...");
    let rebuilt = index.rebuild().await;
    rebuild_spinner.finish_and_clear();
    rebuilt.map_err(|e| format!("Failed to rebuild documentation index: {e}"))?;

    let stats = index.stats().await;
    match args.output {
        OutputFormat::Json => print_json(&stats),
        OutputFormat::Table => {
            print!("{}", render_stats(&stats, &format_elapsed_ms(start)));
            Ok(())
        }
    }
}

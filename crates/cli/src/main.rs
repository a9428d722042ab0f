//! `skyctl` command-line entry point.

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use std::ffi::OsString;

use clap::{CommandFactory, Parser, Subcommand};

mod common;
mod docs;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "skyctl",
    version,
    about = "\x1b[36mskyctl\x1b[0m control-plane CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 📚 Search and browse the skyctl documentation
    Docs(docs::DocsArgs),
}

#[tokio::main]
async fn main() {
    logging::init_tracing();
    let code = run(std::env::args_os()).await;
    std::process::exit(code);
}

async fn run<I>(args: I) -> i32
where
    I: IntoIterator<Item = OsString>,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Docs(args)) => docs::run(args).await,
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

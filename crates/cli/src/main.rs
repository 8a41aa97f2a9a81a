//! `entiform` command-line entry point
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error, or a draft with invalid fields

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use entiform_cli::{Cli, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let code = match run(cli.command).await {
        Ok((output, ok)) => {
            println!("{}", output);
            if ok { 0 } else { 1 }
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            1
        }
    };
    std::process::exit(code);
}

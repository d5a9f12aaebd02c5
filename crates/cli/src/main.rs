use std::process::ExitCode;

use args::Cli;
use clap::Parser;
use commands::process_args;

pub mod args;
pub mod commands;
pub mod logging;
pub mod presenter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    let _guard = logging::init(args.log_level.as_deref())?;

    process_args(&args).await
}

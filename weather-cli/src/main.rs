//! Binary crate for the `daily-weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Installing the log subscriber
//! - Turning failures into diagnostics and exit codes

use std::process::ExitCode;

use clap::Parser;
use weather_core::Config;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();

    let config = Config::load();
    let level = config
        .as_ref()
        .map(|cfg| cfg.logging.level.clone())
        .unwrap_or_else(|_| "warn".to_string());
    logging::init(&level);

    match cmd.run(config).await {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            err.report();
            err.exit_code()
        }
    }
}

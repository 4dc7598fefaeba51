//! rabridge - compile relational algebra IR or legacy scripts to hinted SQL
//!
//! SQL is written to stdout; logs and errors go to stderr.

use clap::Parser;
use std::process::ExitCode;

mod commands;
mod config;
mod logging;

use commands::Cli;
use config::Config;

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match Config::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging);

    match commands::run(cli.command, &config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

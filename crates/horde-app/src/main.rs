use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use horde_app::cli::Cli;
use horde_app::{game_loop, logs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logs::setup_logging(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
    }

    match game_loop::run_cli(&cli) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "could not encode run summary");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

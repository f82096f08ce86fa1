use anyhow::Result;
use clap::Parser;
use cqs_analyzer::cli::{Cli, Commands};
use cqs_analyzer::commands::check::{handle_check, CheckConfig};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    cqs_analyzer::observability::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            snapshot,
            format,
            output,
            config,
            jobs,
        } => {
            let has_errors = handle_check(CheckConfig {
                snapshot,
                format,
                output,
                config,
                jobs,
            })?;
            Ok(if has_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Rules => {
            cqs_analyzer::commands::rules::print_rules(&mut std::io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            cqs_analyzer::commands::init::init_config(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

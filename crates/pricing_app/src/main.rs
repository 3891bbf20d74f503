use std::process::ExitCode;

use clap::Parser;
use pricing_engine::ExportSummary;
use pricing_logging::{price_error, price_info};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::AppError;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod progress;
mod shutdown;

/// Conventional exit status after an interrupt.
const EXIT_CANCELLED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            price_error!("{}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, AppError> {
    match command {
        Commands::Fetch {
            input,
            api_key,
            config,
            output_dir,
        } => {
            let config = AppConfig::load(config.as_deref())?;
            let report = commands::fetch(&input, api_key, &config, &output_dir)?;
            print_summary(&report.summary);
            if report.cancelled {
                return Ok(ExitCode::from(EXIT_CANCELLED));
            }
        }
        Commands::Align {
            codes,
            table,
            output_dir,
        } => {
            let summary = commands::align(&codes, &table, output_dir)?;
            print_summary(&summary);
        }
        Commands::Dedupe { input, output } => {
            let report = commands::dedupe(&input, output)?;
            let line = format!(
                "Removed duplicates: {} -> {} rows, saved to {}",
                report.before,
                report.after,
                report.output.display()
            );
            price_info!("{}", line);
            println!("{line}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &ExportSummary) {
    let line = format!(
        "Results in {}: {} total, {} priced, {} failed, {} not found",
        summary.output_dir.display(),
        summary.master,
        summary.success,
        summary.failure,
        summary.not_found
    );
    price_info!("{}", line);
    println!("{line}");
}

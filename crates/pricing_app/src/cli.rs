use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogDestination;

#[derive(Parser)]
#[command(
    name = "price-harvester",
    version,
    about = "Batch price lookup with rate-limit aware pacing and result classification"
)]
pub struct Cli {
    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogDestination::Both, global = true)]
    pub log: LogDestination,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up prices for a code list and write the classified result tables.
    Fetch {
        #[arg(help = "Header-less CSV with one product code per row")]
        input: PathBuf,

        #[arg(long, env = "PRICING_API_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(long, help = "RON config file (defaults to ./pricing.ron when present)")]
        config: Option<PathBuf>,

        #[arg(
            long,
            default_value = ".",
            help = "Directory receiving the timestamped results folder"
        )]
        output_dir: PathBuf,
    },
    /// Align an existing product table to a code list and classify the rows.
    Align {
        #[arg(help = "Header-less CSV with one product code per row")]
        codes: PathBuf,

        #[arg(help = "Product table with a header row, including price and note columns")]
        table: PathBuf,

        #[arg(long, help = "Defaults to a `results` folder next to the table")]
        output_dir: Option<PathBuf>,
    },
    /// Drop rows whose first column repeats an earlier row.
    Dedupe {
        input: PathBuf,

        #[arg(long, help = "Defaults to <input>_unique.csv next to the input")]
        output: Option<PathBuf>,
    },
}

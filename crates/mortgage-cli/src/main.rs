mod commands;
mod export;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::{ExportArgs, LoanArgs};

/// Fixed-rate mortgage amortization schedules
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage amortization schedules",
    long_about = "Computes the monthly payment and full amortization schedule of a \
                  fixed-rate mortgage from an index-denominated property price, with \
                  down payment and subsidy, and exports the result as a spreadsheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full amortization schedule with summary
    Schedule(LoanArgs),
    /// Loan summary only (totals and restated inputs)
    Summary(LoanArgs),
    /// Narrative description of the loan
    Narrative(LoanArgs),
    /// Write the summary and schedule to an .xlsx workbook
    Export(ExportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::mortgage::run_schedule(args),
        Commands::Summary(args) => commands::mortgage::run_summary(args),
        Commands::Narrative(args) => commands::mortgage::run_narrative(args),
        Commands::Export(args) => commands::mortgage::run_export(args),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {:?}", e);
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

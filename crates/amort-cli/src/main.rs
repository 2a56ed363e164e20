mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{PaymentArgs, ScheduleArgs, TotalsArgs};
use commands::rate::SolveRateArgs;

/// Fixed-rate amortization and implied-rate calculations
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Fixed-rate amortization and implied-rate calculations",
    long_about = "The shared numeric core behind loan calculator front-ends: \
                  fixed periodic payments, lifetime totals, full amortization \
                  schedules, and the implied periodic rate behind a known \
                  payment, all with decimal precision."
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
    /// Fixed periodic payment for a loan
    Payment(PaymentArgs),
    /// Payment plus total paid and total interest
    Totals(TotalsArgs),
    /// Full period-by-period amortization schedule
    Schedule(ScheduleArgs),
    /// Implied periodic rate behind a known payment (bisection)
    SolveRate(SolveRateArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Totals(args) => commands::amortization::run_totals(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::SolveRate(args) => commands::rate::run_solve_rate(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{QuoteArgs, ScheduleArgs};
use commands::eligibility::RecommendArgs;
use commands::portfolio::PortfolioArgs;
use commands::simulator::SimulateArgs;

/// Loan amortization and eligibility calculations
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan amortization and eligibility calculations",
    long_about = "A CLI for deterministic loan calculations with decimal precision. \
                  Supports installment quotes, full amortization schedules, \
                  eligibility screening of a loan catalog, tenure simulation, \
                  and portfolio aggregation."
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
    /// Quote the fixed monthly installment and repayment totals
    Quote(QuoteArgs),
    /// Generate the month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Screen a loan catalog against a borrower profile
    Recommend(RecommendArgs),
    /// Compare repayment plans for two tenures
    Simulate(SimulateArgs),
    /// Aggregate a set of active loans
    Portfolio(PortfolioArgs),
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
        Commands::Quote(args) => commands::amortization::run_quote(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Recommend(args) => commands::eligibility::run_recommend(args),
        Commands::Simulate(args) => commands::simulator::run_simulate(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
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

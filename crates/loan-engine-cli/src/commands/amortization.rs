use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_engine_core::amortization;
use loan_engine_core::schedule;
use loan_engine_core::LoanTerms;

use crate::input;

/// Arguments for an installment quote
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct QuoteArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Quoted annual rate in percent (e.g. 8.5)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in months
    #[arg(long, alias = "tenure")]
    pub tenure_months: Option<u32>,
}

/// Arguments for schedule generation (same inputs as a quote)
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Quoted annual rate in percent (e.g. 8.5)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in months
    #[arg(long, alias = "tenure")]
    pub tenure_months: Option<u32>,
}

fn terms_from(
    input_path: &Option<String>,
    principal: Option<Decimal>,
    rate: Option<Decimal>,
    tenure: Option<u32>,
) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LoanTerms {
        principal: principal.ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: rate
            .ok_or("--annual-rate-percent is required (or provide --input)")?,
        tenure_months: tenure.ok_or("--tenure-months is required (or provide --input)")?,
    })
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = terms_from(
        &args.input,
        args.principal,
        args.annual_rate_percent,
        args.tenure_months,
    )?;
    let result = amortization::quote(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = terms_from(
        &args.input,
        args.principal,
        args.annual_rate_percent,
        args.tenure_months,
    )?;
    let result = schedule::build_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}

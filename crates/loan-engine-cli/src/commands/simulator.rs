use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_engine_core::simulator::{self, SimulationInput};

use crate::input;

/// Arguments for tenure simulation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SimulateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Quoted annual rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Current tenure in months
    #[arg(long)]
    pub current_tenure: Option<u32>,

    /// Proposed tenure in months
    #[arg(long)]
    pub proposed_tenure: Option<u32>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SimulationInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            current_tenure_months: args
                .current_tenure
                .ok_or("--current-tenure is required (or provide --input)")?,
            proposed_tenure_months: args
                .proposed_tenure
                .ok_or("--proposed-tenure is required (or provide --input)")?,
        }
    };

    let result = simulator::simulate(&sim_input)?;
    Ok(serde_json::to_value(result)?)
}

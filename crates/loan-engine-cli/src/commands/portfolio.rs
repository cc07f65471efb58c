use clap::Args;
use serde_json::Value;

use loan_engine_core::portfolio::{self, PortfolioInput};

use crate::input;

/// Arguments for portfolio aggregation
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to a JSON file holding the active loans ({ loans: [...] })
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio_input: PortfolioInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for portfolio aggregation".into());
    };

    let result = portfolio::summarize_portfolio(&portfolio_input)?;
    Ok(serde_json::to_value(result)?)
}

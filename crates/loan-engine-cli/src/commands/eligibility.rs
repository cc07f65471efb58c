use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_engine_core::eligibility::{self, RecommendationInput};
use loan_engine_core::BorrowerProfile;

use crate::input;

/// Arguments for eligibility screening
#[derive(Args)]
pub struct RecommendArgs {
    /// Path to a JSON file holding the full request
    /// ({ catalog, profile, requested_principal })
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON file holding just the loan catalog
    #[arg(long)]
    pub catalog: Option<String>,

    /// Monthly income (with --catalog)
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Monthly expenses (with --catalog)
    #[arg(long)]
    pub monthly_expenses: Option<Decimal>,

    /// Credit score, 300-900 (with --catalog)
    #[arg(long)]
    pub credit_score: Option<u16>,

    /// Requested loan amount (with --catalog)
    #[arg(long)]
    pub principal: Option<Decimal>,
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: RecommendationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else if let Some(ref catalog_path) = args.catalog {
        RecommendationInput {
            catalog: input::file::read_json(catalog_path)?,
            profile: BorrowerProfile {
                monthly_income: args
                    .monthly_income
                    .ok_or("--monthly-income is required with --catalog")?,
                monthly_expenses: args
                    .monthly_expenses
                    .ok_or("--monthly-expenses is required with --catalog")?,
                credit_score: args
                    .credit_score
                    .ok_or("--credit-score is required with --catalog")?,
            },
            requested_principal: args
                .principal
                .ok_or("--principal is required with --catalog")?,
        }
    } else {
        return Err("--input (or --catalog plus profile flags) is required".into());
    };

    let result = eligibility::recommend_offers(&request)?;
    Ok(serde_json::to_value(result)?)
}

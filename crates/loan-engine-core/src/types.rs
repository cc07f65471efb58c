use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates in quoted percentage form (5 = 5% p.a.). Never as decimals.
pub type RatePercent = Decimal;

/// Loan product category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanType {
    Home,
    Car,
    Personal,
    Student,
    Business,
    Other(String),
}

/// The three scalars that fully determine an amortizing loan.
///
/// Immutable input value; two `LoanTerms` with equal fields are the same
/// loan. Validation happens at the function boundary, not at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Quoted annual rate (e.g. 8.5 for 8.5% p.a.).
    pub annual_rate_percent: RatePercent,
    /// Term in monthly periods.
    pub tenure_months: u32,
}

/// A catalog entry. Static reference data; never mutated after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOffer {
    pub id: String,
    pub institution: String,
    pub loan_type: LoanType,
    pub annual_rate_percent: RatePercent,
    pub tenure_months: u32,
    pub processing_fee_percent: RatePercent,
    pub features: Vec<String>,
}

/// A borrower's financial snapshot, supplied once per recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    /// Bureau score, 300–900.
    pub credit_score: u16,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

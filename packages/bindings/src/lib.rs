use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_loan(input_json: String) -> NapiResult<String> {
    let terms: loan_engine_core::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_engine_core::amortization::quote(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let terms: loan_engine_core::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_engine_core::schedule::build_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[napi]
pub fn recommend_loans(input_json: String) -> NapiResult<String> {
    let input: loan_engine_core::eligibility::RecommendationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_engine_core::eligibility::recommend_offers(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_repayment(input_json: String) -> NapiResult<String> {
    let input: loan_engine_core::simulator::SimulationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_engine_core::simulator::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn summarize_portfolio(input_json: String) -> NapiResult<String> {
    let input: loan_engine_core::portfolio::PortfolioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_engine_core::portfolio::summarize_portfolio(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

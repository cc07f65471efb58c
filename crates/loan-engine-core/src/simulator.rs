//! Repayment-plan simulation: the same principal and rate amortized over two
//! tenures, side by side. Pure composition of the annuity math and the
//! schedule generator; the two scenarios share nothing but their inputs.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{installment, total_repayment};
use crate::schedule::{generate_schedule, ScheduleEntry};
use crate::types::{with_metadata, ComputationOutput, LoanTerms, Money, RatePercent};
use crate::LoanEngineResult;

/// Simulation request: one loan, two candidate tenures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub principal: Money,
    pub annual_rate_percent: RatePercent,
    pub current_tenure_months: u32,
    pub proposed_tenure_months: u32,
}

/// Fully worked repayment plan for one tenure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenureScenario {
    pub tenure_months: u32,
    pub installment: Money,
    pub total_repayment: Money,
    pub total_interest: Money,
    pub schedule: Vec<ScheduleEntry>,
}

/// Current-vs-proposed comparison. Deltas are proposed minus current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationComparison {
    pub current: TenureScenario,
    pub proposed: TenureScenario,
    pub installment_delta: Money,
    pub interest_delta: Money,
}

/// Simulate moving a loan from its current tenure to a proposed one.
pub fn simulate(
    input: &SimulationInput,
) -> LoanEngineResult<ComputationOutput<SimulationComparison>> {
    let start = Instant::now();

    let current = build_scenario(input, input.current_tenure_months)?;
    let proposed = build_scenario(input, input.proposed_tenure_months)?;

    let output = SimulationComparison {
        installment_delta: proposed.installment - current.installment,
        interest_delta: proposed.total_interest - current.total_interest,
        current,
        proposed,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Tenure Comparison (annuity + amortization schedule)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

fn build_scenario(input: &SimulationInput, tenure_months: u32) -> LoanEngineResult<TenureScenario> {
    let terms = LoanTerms {
        principal: input.principal,
        annual_rate_percent: input.annual_rate_percent,
        tenure_months,
    };

    let emi = installment(&terms)?;
    let total = total_repayment(emi, tenure_months);
    let schedule = generate_schedule(&terms)?;

    Ok(TenureScenario {
        tenure_months,
        installment: emi,
        total_repayment: total,
        total_interest: total - input.principal,
        schedule,
    })
}

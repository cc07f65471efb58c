//! Month-by-month amortization schedule.
//!
//! Iteratively applies the fixed installment from [`crate::amortization`]:
//! each month accrues interest on the open balance, the remainder of the
//! installment retires principal. Emits `tenure + 1` entries so month 0
//! always reports the initial principal before any payment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, installment};
use crate::types::{with_metadata, ComputationOutput, LoanTerms, Money};
use crate::LoanEngineResult;

/// One row of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Month index, 0..=tenure. Index 0 is the pre-payment state.
    pub month: u32,
    /// Outstanding balance after this month's payment (clamped at zero).
    pub balance: Money,
    /// Interest portion of this month's installment (zero at index 0).
    pub interest: Money,
    /// Principal portion of this month's installment (zero at index 0).
    pub principal: Money,
}

/// Schedule plus the totals a rendering layer wants alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub entries: Vec<ScheduleEntry>,
    pub installment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

/// Generate the full repayment schedule for the given terms.
///
/// Recomputed fresh on every call; only local accumulators, the input is
/// never mutated. Validation is the same as [`installment`], which already
/// rules out any rate/tenure combination where the balance could grow.
pub fn generate_schedule(terms: &LoanTerms) -> LoanEngineResult<Vec<ScheduleEntry>> {
    let emi = installment(terms)?;
    let r = amortization::monthly_rate(terms.annual_rate_percent);

    let mut entries = Vec::with_capacity(terms.tenure_months as usize + 1);
    entries.push(ScheduleEntry {
        month: 0,
        balance: terms.principal,
        interest: Decimal::ZERO,
        principal: Decimal::ZERO,
    });

    let mut balance = terms.principal;
    for month in 1..=terms.tenure_months {
        let interest = balance * r;
        let principal_paid = emi - interest;
        balance -= principal_paid;

        // Clamp: rounding drift must not produce a negative terminal balance.
        let reported = if balance < Decimal::ZERO {
            Decimal::ZERO
        } else {
            balance
        };

        entries.push(ScheduleEntry {
            month,
            balance: reported,
            interest,
            principal: principal_paid,
        });
    }

    Ok(entries)
}

/// Generate the schedule together with installment and totals.
pub fn build_schedule(terms: &LoanTerms) -> LoanEngineResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();

    let emi = installment(terms)?;
    let entries = generate_schedule(terms)?;

    let total_interest: Money = entries.iter().map(|e| e.interest).sum();
    let total_principal: Money = entries.iter().map(|e| e.principal).sum();

    let output = ScheduleOutput {
        entries,
        installment: emi,
        total_interest,
        total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Iterative Amortization Schedule (level-pay)",
        terms,
        Vec::new(),
        elapsed,
        output,
    ))
}

//! Closed-form annuity math: fixed installment (EMI) and repayment totals.
//!
//! Everything downstream (schedules, eligibility screening, simulation)
//! funnels through [`installment`] so all callers agree on the same figure.
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanEngineError;
use crate::types::{with_metadata, ComputationOutput, LoanTerms, Money, RatePercent};
use crate::LoanEngineResult;

/// Months per year, as Decimal.
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Percent-to-decimal divisor.
const PERCENT: Decimal = dec!(100);

/// Per-offer repayment figures, as a rendering layer displays them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Fixed monthly installment.
    pub installment: Money,
    /// Installment × tenure.
    pub total_repayment: Money,
    /// Total repayment − principal.
    pub total_interest: Money,
}

/// Monthly periodic rate from a quoted annual percentage (5 -> 0.05/12).
pub fn monthly_rate(annual_rate_percent: RatePercent) -> Decimal {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// Fixed monthly installment for the given terms (standard annuity formula).
///
/// `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate.
/// The zero-rate case degenerates to straight division and is branched
/// explicitly rather than hitting a zero denominator.
pub fn installment(terms: &LoanTerms) -> LoanEngineResult<Money> {
    validate_terms(terms)?;

    let r = monthly_rate(terms.annual_rate_percent);
    if r.is_zero() {
        return Ok(terms.principal / Decimal::from(terms.tenure_months));
    }

    let growth = (Decimal::ONE + r).powd(Decimal::from(terms.tenure_months));
    Ok(terms.principal * r * growth / (growth - Decimal::ONE))
}

/// Total amount repaid over the life of the loan.
///
/// Centralizes the multiplication so every caller uses the full-precision
/// installment; rounding happens only at presentation time.
pub fn total_repayment(installment: Money, tenure_months: u32) -> Money {
    installment * Decimal::from(tenure_months)
}

/// Interest component of the total repayment.
pub fn total_interest(installment: Money, tenure_months: u32, principal: Money) -> Money {
    total_repayment(installment, tenure_months) - principal
}

/// Compute the full per-offer quote (installment plus totals).
pub fn quote(terms: &LoanTerms) -> LoanEngineResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();

    let emi = installment(terms)?;
    let total = total_repayment(emi, terms.tenure_months);

    let output = LoanQuote {
        installment: emi,
        total_repayment: total,
        total_interest: total - terms.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Installment Annuity (EMI)",
        terms,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Reject terms the annuity formula is not defined for.
pub(crate) fn validate_terms(terms: &LoanTerms) -> LoanEngineResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidLoanTerms {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(LoanEngineError::InvalidLoanTerms {
            field: "annual_rate_percent".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if terms.tenure_months == 0 {
        return Err(LoanEngineError::InvalidLoanTerms {
            field: "tenure_months".into(),
            reason: "Tenure must be at least one month".into(),
        });
    }
    Ok(())
}

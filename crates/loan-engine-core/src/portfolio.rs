//! Aggregates over a borrower's active loans: totals for a dashboard view
//! and due-date queries for payment reminders. Projected interest reuses the
//! same annuity math as everything else, so dashboard figures and per-offer
//! quotes can never disagree.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{installment, total_interest};
use crate::error::LoanEngineError;
use crate::types::{with_metadata, ComputationOutput, LoanTerms, LoanType, Money, RatePercent};
use crate::LoanEngineResult;

/// Days from disbursal to the first installment.
const FIRST_PAYMENT_OFFSET_DAYS: u64 = 30;

/// A loan the borrower is currently servicing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveLoan {
    pub id: String,
    pub name: String,
    pub loan_type: LoanType,
    /// Original amount borrowed.
    pub amount: Money,
    pub annual_rate_percent: RatePercent,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub outstanding_balance: Money,
    pub next_payment_due: NaiveDate,
}

impl ActiveLoan {
    /// First installment date for a freshly disbursed loan.
    pub fn first_payment_due(start_date: NaiveDate) -> LoanEngineResult<NaiveDate> {
        start_date
            .checked_add_days(Days::new(FIRST_PAYMENT_OFFSET_DAYS))
            .ok_or_else(|| {
                LoanEngineError::DateError(format!(
                    "Cannot compute first payment date from {start_date}"
                ))
            })
    }
}

/// Portfolio summary request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub loans: Vec<ActiveLoan>,
}

/// Per-loan projection detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInterestDetail {
    pub id: String,
    pub name: String,
    pub installment: Money,
    /// Interest over the full term at the original amount.
    pub projected_interest: Money,
}

/// Dashboard aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub active_loan_count: usize,
    /// Sum of outstanding balances.
    pub total_outstanding: Money,
    /// Sum of full-term interest across all loans.
    pub total_projected_interest: Money,
    pub per_loan: Vec<LoanInterestDetail>,
}

/// Summarize a set of active loans.
pub fn summarize_portfolio(
    input: &PortfolioInput,
) -> LoanEngineResult<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut total_outstanding = Decimal::ZERO;
    let mut total_projected_interest = Decimal::ZERO;
    let mut per_loan = Vec::with_capacity(input.loans.len());

    for loan in &input.loans {
        if loan.outstanding_balance < Decimal::ZERO {
            return Err(LoanEngineError::InvalidLoanTerms {
                field: "outstanding_balance".into(),
                reason: format!("Loan '{}' has a negative outstanding balance", loan.id),
            });
        }
        if loan.outstanding_balance > loan.amount {
            warnings.push(format!(
                "Loan '{}' outstanding balance exceeds the original amount",
                loan.id
            ));
        }

        let emi = installment(&LoanTerms {
            principal: loan.amount,
            annual_rate_percent: loan.annual_rate_percent,
            tenure_months: loan.term_months,
        })?;
        let projected = total_interest(emi, loan.term_months, loan.amount);

        total_outstanding += loan.outstanding_balance;
        total_projected_interest += projected;
        per_loan.push(LoanInterestDetail {
            id: loan.id.clone(),
            name: loan.name.clone(),
            installment: emi,
            projected_interest: projected,
        });
    }

    let output = PortfolioSummary {
        active_loan_count: input.loans.len(),
        total_outstanding,
        total_projected_interest,
        per_loan,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Active Loan Portfolio Aggregation",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Loans with an installment falling due on the given date.
pub fn loans_due_on(loans: &[ActiveLoan], date: NaiveDate) -> Vec<ActiveLoan> {
    loans
        .iter()
        .filter(|loan| loan.next_payment_due == date)
        .cloned()
        .collect()
}

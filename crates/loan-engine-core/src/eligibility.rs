//! Affordability and credit-tier screening of a loan catalog.
//!
//! Two tests per offer, both against named policy values rather than inline
//! literals so they can be tuned and tested independently:
//!
//! 1. **Affordability** -- the estimated installment at the requested
//!    principal must fit within a fixed share of disposable income.
//! 2. **Credit tier** -- each tier a score unlocks tolerates rates up to its
//!    cap; an offer passes if any unlocked tier accepts its rate. Higher
//!    scores unlock more tiers, so eligibility is monotonic in score.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::installment;
use crate::error::LoanEngineError;
use crate::types::{
    with_metadata, BorrowerProfile, ComputationOutput, LoanOffer, LoanTerms, Money, RatePercent,
};
use crate::LoanEngineResult;

/// Share of disposable income an installment may consume.
pub const AFFORDABILITY_RATIO: Decimal = dec!(0.4);

/// Lowest bureau score the engine accepts.
pub const MIN_CREDIT_SCORE: u16 = 300;

/// Highest bureau score the engine accepts.
pub const MAX_CREDIT_SCORE: u16 = 900;

/// One rung of the credit staircase: scores at or above `min_score`
/// tolerate rates up to `max_rate_percent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditTier {
    pub min_score: u16,
    pub max_rate_percent: RatePercent,
}

/// Screening policy. `Default` carries the production constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub affordability_ratio: Decimal,
    pub tiers: Vec<CreditTier>,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        EligibilityPolicy {
            affordability_ratio: AFFORDABILITY_RATIO,
            tiers: vec![
                CreditTier {
                    min_score: 550,
                    max_rate_percent: dec!(15),
                },
                CreditTier {
                    min_score: 650,
                    max_rate_percent: dec!(12),
                },
                CreditTier {
                    min_score: 750,
                    max_rate_percent: dec!(10),
                },
            ],
        }
    }
}

impl EligibilityPolicy {
    /// Highest rate any unlocked tier tolerates, or `None` when the score
    /// is below every tier.
    pub fn max_acceptable_rate(&self, credit_score: u16) -> Option<RatePercent> {
        self.tiers
            .iter()
            .filter(|tier| credit_score >= tier.min_score)
            .map(|tier| tier.max_rate_percent)
            .max()
    }
}

/// Recommendation request: catalog + profile + the amount the borrower wants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationInput {
    pub catalog: Vec<LoanOffer>,
    pub profile: BorrowerProfile,
    pub requested_principal: Money,
}

/// Per-offer screening detail for eligible offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibleOffer {
    pub offer: LoanOffer,
    /// Installment estimated at the requested principal.
    pub estimated_installment: Money,
}

/// Output of the recommendation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationOutput {
    pub eligible: Vec<EligibleOffer>,
    pub eligible_count: usize,
    /// Disposable income × affordability ratio.
    pub affordability_cap: Money,
}

/// Stable filter over the catalog: an offer survives iff it passes both the
/// affordability and credit-tier tests. Catalog order is preserved and an
/// empty result is a normal outcome, not an error.
pub fn filter_offers(
    catalog: &[LoanOffer],
    profile: &BorrowerProfile,
    requested_principal: Money,
    policy: &EligibilityPolicy,
) -> LoanEngineResult<Vec<LoanOffer>> {
    Ok(screen_offers(catalog, profile, requested_principal, policy)?
        .into_iter()
        .map(|e| e.offer)
        .collect())
}

/// Screen the catalog and return eligible offers with installment detail
/// wrapped in the standard envelope.
pub fn recommend_offers(
    input: &RecommendationInput,
) -> LoanEngineResult<ComputationOutput<RecommendationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let eligible = screen_offers(
        &input.catalog,
        &input.profile,
        input.requested_principal,
        &EligibilityPolicy::default(),
    )?;

    let disposable = input.profile.monthly_income - input.profile.monthly_expenses;
    if disposable <= Decimal::ZERO {
        warnings.push(format!(
            "Disposable income is {disposable}; no installment is affordable"
        ));
    }

    let output = RecommendationOutput {
        eligible_count: eligible.len(),
        affordability_cap: disposable * AFFORDABILITY_RATIO,
        eligible,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Affordability (40% of disposable income) + Credit Tier Screen",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn screen_offers(
    catalog: &[LoanOffer],
    profile: &BorrowerProfile,
    requested_principal: Money,
    policy: &EligibilityPolicy,
) -> LoanEngineResult<Vec<EligibleOffer>> {
    validate_profile(profile)?;
    if requested_principal <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidLoanTerms {
            field: "requested_principal".into(),
            reason: "Requested principal must be positive".into(),
        });
    }

    let disposable = profile.monthly_income - profile.monthly_expenses;
    let affordability_cap = disposable * policy.affordability_ratio;
    let rate_cap = policy.max_acceptable_rate(profile.credit_score);

    let mut eligible = Vec::new();
    for offer in catalog {
        let rate_ok = match rate_cap {
            Some(cap) => offer.annual_rate_percent <= cap,
            None => false,
        };
        if !rate_ok {
            continue;
        }

        let emi = installment(&LoanTerms {
            principal: requested_principal,
            annual_rate_percent: offer.annual_rate_percent,
            tenure_months: offer.tenure_months,
        })?;

        if emi <= affordability_cap {
            eligible.push(EligibleOffer {
                offer: offer.clone(),
                estimated_installment: emi,
            });
        }
    }

    Ok(eligible)
}

fn validate_profile(profile: &BorrowerProfile) -> LoanEngineResult<()> {
    if profile.monthly_income <= Decimal::ZERO {
        return Err(LoanEngineError::InvalidLoanTerms {
            field: "monthly_income".into(),
            reason: "Monthly income must be positive".into(),
        });
    }
    if profile.monthly_expenses < Decimal::ZERO {
        return Err(LoanEngineError::InvalidLoanTerms {
            field: "monthly_expenses".into(),
            reason: "Monthly expenses cannot be negative".into(),
        });
    }
    if profile.credit_score < MIN_CREDIT_SCORE || profile.credit_score > MAX_CREDIT_SCORE {
        return Err(LoanEngineError::InvalidLoanTerms {
            field: "credit_score".into(),
            reason: format!(
                "Credit score must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanType;
    use rust_decimal_macros::dec;

    fn offer(id: &str, rate: Decimal, months: u32) -> LoanOffer {
        LoanOffer {
            id: id.into(),
            institution: format!("Bank {id}"),
            loan_type: LoanType::Personal,
            annual_rate_percent: rate,
            tenure_months: months,
            processing_fee_percent: dec!(1),
            features: vec!["No prepayment penalty".into()],
        }
    }

    fn profile(income: Decimal, expenses: Decimal, score: u16) -> BorrowerProfile {
        BorrowerProfile {
            monthly_income: income,
            monthly_expenses: expenses,
            credit_score: score,
        }
    }

    #[test]
    fn test_max_acceptable_rate_staircase() {
        let policy = EligibilityPolicy::default();
        assert_eq!(policy.max_acceptable_rate(540), None);
        assert_eq!(policy.max_acceptable_rate(550), Some(dec!(15)));
        assert_eq!(policy.max_acceptable_rate(700), Some(dec!(15)));
        // Unlocking higher tiers never lowers the tolerated rate.
        assert_eq!(policy.max_acceptable_rate(800), Some(dec!(15)));
    }

    #[test]
    fn test_below_all_tiers_nothing_qualifies() {
        let catalog = vec![offer("a", dec!(8), 60), offer("b", dec!(14), 120)];
        let result = filter_offers(
            &catalog,
            &profile(dec!(100_000), dec!(0), 500),
            dec!(10_000),
            &EligibilityPolicy::default(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let catalog = vec![
            offer("first", dec!(9), 240),
            offer("second", dec!(7), 240),
            offer("third", dec!(11), 240),
        ];
        let result = filter_offers(
            &catalog,
            &profile(dec!(500_000), dec!(50_000), 800),
            dec!(1_000_000),
            &EligibilityPolicy::default(),
        )
        .unwrap();
        let ids: Vec<&str> = result.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_affordability_uses_exact_installment() {
        // income 5000, expenses 2000 -> cap = 1200. Offer at 9% over 240
        // months for 1,000,000: the test decides inclusion from the very
        // same installment the filter computes.
        let catalog = vec![offer("home", dec!(9), 240)];
        let p = profile(dec!(5_000), dec!(2_000), 800);

        let emi = installment(&LoanTerms {
            principal: dec!(1_000_000),
            annual_rate_percent: dec!(9),
            tenure_months: 240,
        })
        .unwrap();
        let cap = (dec!(5_000) - dec!(2_000)) * AFFORDABILITY_RATIO;

        let result =
            filter_offers(&catalog, &p, dec!(1_000_000), &EligibilityPolicy::default()).unwrap();
        assert_eq!(result.is_empty(), emi > cap);
    }

    #[test]
    fn test_raising_score_never_removes_offers() {
        let catalog = vec![
            offer("cheap", dec!(8), 60),
            offer("mid", dec!(11.5), 60),
            offer("steep", dec!(14.5), 60),
        ];
        let policy = EligibilityPolicy::default();
        let principal = dec!(100_000);

        let at_640 = filter_offers(&catalog, &profile(dec!(50_000), dec!(10_000), 640), principal, &policy)
            .unwrap();
        let at_760 = filter_offers(&catalog, &profile(dec!(50_000), dec!(10_000), 760), principal, &policy)
            .unwrap();

        for o in &at_640 {
            assert!(
                at_760.iter().any(|p| p.id == o.id),
                "offer {} vanished when score rose",
                o.id
            );
        }
    }

    #[test]
    fn test_empty_catalog_is_ok() {
        let result = filter_offers(
            &[],
            &profile(dec!(5_000), dec!(2_000), 700),
            dec!(10_000),
            &EligibilityPolicy::default(),
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_credit_score() {
        let err = filter_offers(
            &[],
            &profile(dec!(5_000), dec!(2_000), 950),
            dec!(10_000),
            &EligibilityPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoanEngineError::InvalidLoanTerms { .. }));
    }

    #[test]
    fn test_recommend_envelope_counts_and_cap() {
        let input = RecommendationInput {
            catalog: vec![offer("a", dec!(9), 240), offer("b", dec!(16), 240)],
            profile: profile(dec!(500_000), dec!(100_000), 800),
            requested_principal: dec!(1_000_000),
        };
        let out = recommend_offers(&input).unwrap();
        assert_eq!(out.result.eligible_count, out.result.eligible.len());
        assert_eq!(out.result.affordability_cap, dec!(160_000));
        // 16% exceeds every tier cap regardless of score.
        assert!(out.result.eligible.iter().all(|e| e.offer.id != "b"));
    }

    #[test]
    fn test_custom_policy_is_honoured() {
        let strict = EligibilityPolicy {
            affordability_ratio: dec!(0.1),
            tiers: vec![CreditTier {
                min_score: 800,
                max_rate_percent: dec!(6),
            }],
        };
        let catalog = vec![offer("a", dec!(9), 240)];
        let result = filter_offers(
            &catalog,
            &profile(dec!(500_000), dec!(0), 790),
            dec!(100_000),
            &strict,
        )
        .unwrap();
        assert!(result.is_empty());
    }
}

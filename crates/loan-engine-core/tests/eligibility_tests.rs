use loan_engine_core::amortization::installment;
use loan_engine_core::eligibility::{
    filter_offers, recommend_offers, EligibilityPolicy, RecommendationInput, AFFORDABILITY_RATIO,
};
use loan_engine_core::{BorrowerProfile, LoanOffer, LoanTerms, LoanType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Eligibility screening tests
// ===========================================================================

fn sample_catalog() -> Vec<LoanOffer> {
    vec![
        LoanOffer {
            id: "hl-1".into(),
            institution: "National Housing Bank".into(),
            loan_type: LoanType::Home,
            annual_rate_percent: dec!(8.5),
            tenure_months: 240,
            processing_fee_percent: dec!(0.5),
            features: vec!["Zero foreclosure charges".into(), "Doorstep service".into()],
        },
        LoanOffer {
            id: "cl-1".into(),
            institution: "Metro Auto Finance".into(),
            loan_type: LoanType::Car,
            annual_rate_percent: dec!(9.25),
            tenure_months: 84,
            processing_fee_percent: dec!(1),
            features: vec!["Instant approval".into()],
        },
        LoanOffer {
            id: "pl-1".into(),
            institution: "QuickCash Lending".into(),
            loan_type: LoanType::Personal,
            annual_rate_percent: dec!(14),
            tenure_months: 48,
            processing_fee_percent: dec!(2),
            features: vec!["No collateral".into()],
        },
    ]
}

fn profile(income: Decimal, expenses: Decimal, score: u16) -> BorrowerProfile {
    BorrowerProfile {
        monthly_income: income,
        monthly_expenses: expenses,
        credit_score: score,
    }
}

#[test]
fn test_affordability_scenario_from_exact_installment() {
    // income 5000, expenses 2000, score 800, requesting 1,000,000 against a
    // 9% / 240-month offer. affordabilityCap = 3000 * 0.4 = 1200. Inclusion
    // must match a comparison against the very installment the engine uses.
    let catalog = vec![LoanOffer {
        id: "big".into(),
        institution: "Mega Bank".into(),
        loan_type: LoanType::Home,
        annual_rate_percent: dec!(9),
        tenure_months: 240,
        processing_fee_percent: dec!(0.5),
        features: vec![],
    }];
    let p = profile(dec!(5_000), dec!(2_000), 800);

    let emi = installment(&LoanTerms {
        principal: dec!(1_000_000),
        annual_rate_percent: dec!(9),
        tenure_months: 240,
    })
    .unwrap();
    let cap = (dec!(5_000) - dec!(2_000)) * AFFORDABILITY_RATIO;
    assert_eq!(cap, dec!(1_200));

    let included = !filter_offers(&catalog, &p, dec!(1_000_000), &EligibilityPolicy::default())
        .unwrap()
        .is_empty();
    assert_eq!(included, emi <= cap);
    // ~9000/month against a 1200 cap: excluded.
    assert!(!included);
}

#[test]
fn test_score_monotonicity_640_to_760() {
    let catalog = sample_catalog();
    let policy = EligibilityPolicy::default();
    let principal = dec!(500_000);

    let at_640 =
        filter_offers(&catalog, &profile(dec!(200_000), dec!(40_000), 640), principal, &policy)
            .unwrap();
    let at_760 =
        filter_offers(&catalog, &profile(dec!(200_000), dec!(40_000), 760), principal, &policy)
            .unwrap();

    // Raising the score never removes an offer.
    for o in &at_640 {
        assert!(at_760.iter().any(|q| q.id == o.id), "lost offer {}", o.id);
    }
}

#[test]
fn test_no_tier_below_550() {
    let result = filter_offers(
        &sample_catalog(),
        &profile(dec!(1_000_000), dec!(0), 549),
        dec!(10_000),
        &EligibilityPolicy::default(),
    )
    .unwrap();
    assert!(result.is_empty(), "sub-550 scores qualify for nothing");
}

#[test]
fn test_empty_result_is_ok_not_error() {
    // Disposable income of 100 affords none of these installments.
    let result = filter_offers(
        &sample_catalog(),
        &profile(dec!(2_100), dec!(2_000), 800),
        dec!(500_000),
        &EligibilityPolicy::default(),
    );
    assert!(matches!(result, Ok(ref v) if v.is_empty()));
}

#[test]
fn test_recommendation_envelope_details() {
    let input = RecommendationInput {
        catalog: sample_catalog(),
        profile: profile(dec!(200_000), dec!(40_000), 720),
        requested_principal: dec!(500_000),
    };
    let out = recommend_offers(&input).unwrap();

    // Every eligible offer carries the installment used to screen it.
    for e in &out.result.eligible {
        let expected = installment(&LoanTerms {
            principal: dec!(500_000),
            annual_rate_percent: e.offer.annual_rate_percent,
            tenure_months: e.offer.tenure_months,
        })
        .unwrap();
        assert_eq!(e.estimated_installment, expected);
        assert!(e.estimated_installment <= out.result.affordability_cap);
    }
    assert_eq!(out.result.eligible_count, out.result.eligible.len());
}

#[test]
fn test_catalog_is_not_reordered() {
    let catalog = sample_catalog();
    let result = filter_offers(
        &catalog,
        &profile(dec!(200_000), dec!(40_000), 800),
        dec!(500_000),
        &EligibilityPolicy::default(),
    )
    .unwrap();

    // Whatever survives must appear in original catalog order.
    let catalog_pos = |id: &str| catalog.iter().position(|o| o.id == id).unwrap();
    for pair in result.windows(2) {
        assert!(catalog_pos(&pair[0].id) < catalog_pos(&pair[1].id));
    }
}

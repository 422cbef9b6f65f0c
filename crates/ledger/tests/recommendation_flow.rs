use analytics::MetricsEngine;
use chrono::{TimeZone, Utc};
use core_types::{MarketSnapshot, PortfolioKind, RiskTolerance};
use ledger::{Decision, VoteBook, Voter};
use portfolios::{fallback_portfolios, generated_or_fallback};
use projection::{ProjectionEngine, initial_investment};
use rust_decimal_macros::dec;

const NATIVE: &str = "Portfolio A — ether.fi Native";
const BALANCED: &str = "Portfolio B — Balanced Yield";

#[test]
fn reviewer_is_paid_from_the_chosen_portfolio() {
    let market = MarketSnapshot::new(dec!(4.5), dec!(3000));
    let set = fallback_portfolios(RiskTolerance::Medium, PortfolioKind::EtherfiNative);

    let metrics = MetricsEngine::new()
        .compute_metrics(set.get(NATIVE).unwrap(), Some(&market))
        .unwrap();
    assert_eq!(metrics.expected_return_pct, dec!(6.87));

    let principal = initial_investment(dec!(5), market.reference_price.unwrap());
    assert_eq!(principal, dec!(15000.00));

    let projection = ProjectionEngine::new().project_portfolio(principal, &metrics, 30);
    assert_eq!(projection.total_profit, dec!(84.70));
    assert_eq!(projection.split.user, dec!(81.31));
    assert_eq!(projection.split.reviewer, dec!(2.54));
    assert_eq!(projection.split.platform, dec!(0.85));

    let mut book = VoteBook::new();
    let rec_id = book.open();
    book.record_vote(rec_id, Voter::reviewer(11, "ana"), NATIVE).unwrap();
    book.record_vote(rec_id, Voter::reviewer(12, "bo"), BALANCED).unwrap();
    book.record_vote(rec_id, Voter::anonymous(), NATIVE).unwrap();
    assert_eq!(book.get(rec_id).unwrap().leading_choice(), Some((NATIVE, 2)));

    let decided_at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    book.record_decision(rec_id, Decision::from_projection(NATIVE, &projection, decided_at))
        .unwrap();

    let ana = book.reviewer_profile(11);
    assert_eq!(ana.successful_recommendations, 1);
    assert_eq!(ana.success_rate, dec!(100));
    assert_eq!(ana.total_earnings, dec!(2.54));

    let bo = book.reviewer_profile(12);
    assert_eq!(bo.successful_recommendations, 0);
    assert!(!bo.vote_history[0].was_followed);
    assert_eq!(book.reviewer_earnings(12).total_earnings, dec!(2.54));
}

#[test]
fn rejected_generator_output_still_yields_a_usable_pair() {
    let set = generated_or_fallback(
        Some("Sorry, I can't help with that."),
        RiskTolerance::High,
        PortfolioKind::Traditional,
    );
    assert_eq!(set.portfolios.len(), 2);

    let market = MarketSnapshot::new(dec!(4.5), dec!(3000));
    let engine = MetricsEngine::new();
    for portfolio in &set.portfolios {
        let metrics = engine
            .compute_metrics(&portfolio.allocation, Some(&market))
            .unwrap();
        assert_eq!(
            metrics.crypto_exposure_pct + metrics.stable_exposure_pct,
            dec!(100)
        );
    }
}

#[test]
fn metrics_wait_for_a_yield_rate() {
    let set = fallback_portfolios(RiskTolerance::Low, PortfolioKind::EtherfiNative);
    let no_yield = MarketSnapshot {
        base_yield_pct: None,
        reference_price: Some(dec!(3000)),
        tvl_billions: None,
    };
    let engine = MetricsEngine::new();
    for portfolio in &set.portfolios {
        assert!(engine.compute_metrics(&portfolio.allocation, Some(&no_yield)).is_none());
        assert!(engine.compute_metrics(&portfolio.allocation, None).is_none());
    }
}

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use valuation_core::mortgage::amortization::{self, AmortizationInput};

// ===========================================================================
// Reference schedule: 800k at 6% over 30 years
// ===========================================================================

#[test]
fn test_reference_loan_payment_and_payoff() {
    // 800k at 0.5%/month over 360 months: payment = 8 x 599.5505 ≈ 4796.40
    let input = AmortizationInput {
        principal: dec!(800000),
        annual_rate: dec!(0.06),
        term_years: 30,
    };
    let result = amortization::calculate_amortization(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.monthly_payment, dec!(4796.40));
    assert_eq!(out.schedule.len(), 360);

    let last = out.schedule.last().unwrap();
    assert_eq!(last.month, 360);
    assert_eq!(last.balance, dec!(0.00));
}

#[test]
fn test_reference_loan_first_month() {
    let input = AmortizationInput {
        principal: dec!(800000),
        annual_rate: dec!(0.06),
        term_years: 30,
    };
    let result = amortization::calculate_amortization(&input).unwrap();
    let first = &result.result.schedule[0];

    // 800000 * 0.005 = 4000.00 interest in month 1
    assert_eq!(first.interest, dec!(4000.00));
    assert_eq!(first.principal, dec!(796.40));
    assert_eq!(first.balance, dec!(799203.60));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_every_row_reconciles() {
    let input = AmortizationInput {
        principal: dec!(800000),
        annual_rate: dec!(0.06),
        term_years: 30,
    };
    let result = amortization::calculate_amortization(&input).unwrap();
    let out = &result.result;

    for row in &out.schedule {
        assert_eq!(
            row.interest + row.principal,
            out.monthly_payment,
            "Month {} does not reconcile to the level payment",
            row.month
        );
    }
}

#[test]
fn test_principal_portions_sum_to_principal() {
    let input = AmortizationInput {
        principal: dec!(250000),
        annual_rate: dec!(0.045),
        term_years: 15,
    };
    let result = amortization::calculate_amortization(&input).unwrap();
    let out = &result.result;

    let repaid: Decimal = out.schedule.iter().map(|r| r.principal).sum();
    assert_eq!(repaid, dec!(250000));
}

#[test]
fn test_interest_share_declines_over_time() {
    let input = AmortizationInput {
        principal: dec!(100000),
        annual_rate: dec!(0.06),
        term_years: 30,
    };
    let result = amortization::calculate_amortization(&input).unwrap();
    let schedule = &result.result.schedule;

    assert!(schedule[0].interest > schedule[179].interest);
    assert!(schedule[179].interest > schedule[358].interest);
    assert!(schedule[0].principal < schedule[358].principal);
}

#[test]
fn test_zero_rate_is_straight_line() {
    let input = AmortizationInput {
        principal: dec!(360000),
        annual_rate: Decimal::ZERO,
        term_years: 30,
    };
    let result = amortization::calculate_amortization(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.monthly_payment, dec!(1000));
    assert_eq!(out.total_interest, Decimal::ZERO);
    assert_eq!(out.total_paid, dec!(360000));
    assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_idempotent_on_identical_inputs() {
    let input = AmortizationInput {
        principal: dec!(800000),
        annual_rate: dec!(0.06),
        term_years: 30,
    };
    let first = amortization::calculate_amortization(&input).unwrap();
    let second = amortization::calculate_amortization(&input).unwrap();

    assert_eq!(
        serde_json::to_value(&first.result).unwrap(),
        serde_json::to_value(&second.result).unwrap()
    );
}

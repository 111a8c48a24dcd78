//! Level-coupon bond pricing.
//!
//! Builds the full periodic cash-flow schedule for a fixed-rate bullet bond
//! and discounts it at the periodic yield. Pricing is period-based: a bond
//! with `years` to maturity paying `freq` coupons per year has exactly
//! `years × freq` cash flows, the last of which redeems the face value.
//! All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ValuationError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::ValuationResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for bond pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondPricingInput {
    /// Par / face value (typically 100 or 1000)
    pub face_value: Money,
    /// Annual coupon rate as a decimal (e.g. 0.05 = 5%)
    pub coupon_rate: Rate,
    /// Annual yield to maturity as a decimal
    pub ytm: Rate,
    /// Whole years to maturity
    pub years_to_maturity: u32,
    /// Coupons per year: 1 = annual, 2 = semi-annual, 4 = quarterly, 12 = monthly
    pub payments_per_year: u32,
}

/// A single periodic cash flow (coupon, redemption, or both).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondCashflow {
    /// Period index, 1-based.
    pub period: u32,
    /// Elapsed time at payment, in years (period / frequency).
    pub years: Decimal,
    /// Coupon portion.
    pub coupon: Money,
    /// Principal (face value redemption) portion.
    pub principal: Money,
    /// Total payment for the period.
    pub total: Money,
}

/// Output of bond pricing computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondPricingOutput {
    /// Present value of all cash flows at the periodic yield
    pub price: Money,
    /// Coupon payment per period
    pub coupon_amount: Money,
    /// Periodic discount rate (ytm / frequency)
    pub periodic_rate: Rate,
    /// Total number of coupon periods
    pub num_periods: u32,
    /// Current yield = annual coupon / price
    pub current_yield: Rate,
    /// Total undiscounted coupon income over the life of the bond
    pub total_coupon_income: Money,
    /// Full periodic cash-flow schedule
    pub cashflows: Vec<BondCashflow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price a bond and compute its cash-flow schedule, per-period coupon,
/// periodic discount rate, and current yield.
pub fn price_bond(
    input: &BondPricingInput,
) -> ValuationResult<ComputationOutput<BondPricingOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let freq = Decimal::from(input.payments_per_year);
    let num_periods = input.years_to_maturity * input.payments_per_year;
    let coupon_amount = input.face_value * input.coupon_rate / freq;
    let periodic_rate = input.ytm / freq;
    let annual_coupon = input.face_value * input.coupon_rate;

    let cashflows = build_cashflow_schedule(num_periods, freq, coupon_amount, input.face_value);

    // PV of the schedule at the periodic yield, using iterative discount-factor
    // multiplication (project convention: no powd in pricing loops).
    let one_plus_r = Decimal::ONE + periodic_rate;
    let mut price = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for cf in &cashflows {
        discount *= one_plus_r;
        if discount.is_zero() {
            return Err(ValuationError::DivisionByZero {
                context: format!("bond discount factor at period {}", cf.period),
            });
        }
        price += cf.total / discount;
    }

    let current_yield = if price > Decimal::ZERO {
        annual_coupon / price
    } else {
        warnings.push("Price is zero or negative; current yield undefined".into());
        Decimal::ZERO
    };

    let output = BondPricingOutput {
        price,
        coupon_amount,
        periodic_rate,
        num_periods,
        current_yield,
        total_coupon_income: coupon_amount * Decimal::from(num_periods),
        cashflows,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond pricing — PV of periodic cash flows at the periodic yield",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &BondPricingInput) -> ValuationResult<()> {
    if input.face_value <= Decimal::ZERO {
        return Err(ValuationError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if input.coupon_rate < Decimal::ZERO {
        return Err(ValuationError::InvalidInput {
            field: "coupon_rate".into(),
            reason: "Coupon rate cannot be negative".into(),
        });
    }
    if input.years_to_maturity == 0 {
        return Err(ValuationError::InvalidInput {
            field: "years_to_maturity".into(),
            reason: "Years to maturity must be at least 1".into(),
        });
    }
    if input.payments_per_year == 0 {
        return Err(ValuationError::InvalidInput {
            field: "payments_per_year".into(),
            reason: "Payments per year must be at least 1".into(),
        });
    }
    // Periodic yield must keep 1 + r positive or discounting is meaningless
    let periodic = input.ytm / Decimal::from(input.payments_per_year);
    if Decimal::ONE + periodic <= Decimal::ZERO {
        return Err(ValuationError::InvalidInput {
            field: "ytm".into(),
            reason: "Periodic yield must be greater than -100%".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Cashflow schedule
// ---------------------------------------------------------------------------

fn build_cashflow_schedule(
    num_periods: u32,
    freq: Decimal,
    coupon_amount: Money,
    face_value: Money,
) -> Vec<BondCashflow> {
    let mut cashflows = Vec::with_capacity(num_periods as usize);

    for period in 1..=num_periods {
        let principal = if period == num_periods {
            face_value
        } else {
            Decimal::ZERO
        };
        cashflows.push(BondCashflow {
            period,
            years: Decimal::from(period) / freq,
            coupon: coupon_amount,
            principal,
            total: coupon_amount + principal,
        });
    }

    cashflows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Helper: build a standard semi-annual bond input for testing.
    fn semi_annual_bond(coupon_rate: Rate, ytm: Rate) -> BondPricingInput {
        BondPricingInput {
            face_value: dec!(1000),
            coupon_rate,
            ytm,
            years_to_maturity: 5,
            payments_per_year: 2,
        }
    }

    // -----------------------------------------------------------------------
    // 1. Par bond: coupon == YTM => price ~ face value
    // -----------------------------------------------------------------------
    #[test]
    fn test_par_bond_price_at_par() {
        let input = semi_annual_bond(dec!(0.05), dec!(0.05));
        let result = price_bond(&input).unwrap();
        let out = &result.result;

        let diff = (out.price - dec!(1000)).abs();
        assert!(
            diff < dec!(0.0001),
            "Par bond should price at par, got {}",
            out.price
        );
    }

    // -----------------------------------------------------------------------
    // 2. Premium bond: coupon > YTM => price > face value
    // -----------------------------------------------------------------------
    #[test]
    fn test_premium_bond() {
        let input = semi_annual_bond(dec!(0.05), dec!(0.03));
        let result = price_bond(&input).unwrap();

        assert!(
            result.result.price > dec!(1000),
            "Premium bond (5% coupon, 3% YTM) should price above par, got {}",
            result.result.price
        );
    }

    // -----------------------------------------------------------------------
    // 3. Discount bond: coupon < YTM => price < face value
    // -----------------------------------------------------------------------
    #[test]
    fn test_discount_bond() {
        let input = semi_annual_bond(dec!(0.05), dec!(0.07));
        let result = price_bond(&input).unwrap();

        assert!(
            result.result.price < dec!(1000),
            "Discount bond (5% coupon, 7% YTM) should price below par, got {}",
            result.result.price
        );
    }

    // -----------------------------------------------------------------------
    // 4. Zero coupon bond: price = face / (1 + r)^n
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_coupon_bond() {
        let input = BondPricingInput {
            face_value: dec!(1000),
            coupon_rate: dec!(0),
            ytm: dec!(0.06),
            years_to_maturity: 5,
            payments_per_year: 2,
        };
        let result = price_bond(&input).unwrap();
        let out = &result.result;

        // 1000 / 1.03^10, via iterative multiplication
        let mut factor = Decimal::ONE;
        for _ in 0..10 {
            factor *= dec!(1.03);
        }
        let expected = dec!(1000) / factor;

        let diff = (out.price - expected).abs();
        assert!(
            diff < dec!(0.0001),
            "Zero coupon bond: expected ~{}, got {}",
            expected,
            out.price
        );
    }

    // -----------------------------------------------------------------------
    // 5. Schedule shape: n periods, final row redeems face
    // -----------------------------------------------------------------------
    #[test]
    fn test_cashflow_schedule() {
        let input = BondPricingInput {
            face_value: dec!(1000),
            coupon_rate: dec!(0.06),
            ytm: dec!(0.06),
            years_to_maturity: 2,
            payments_per_year: 2,
        };
        let result = price_bond(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.cashflows.len(), 4);
        assert_eq!(out.num_periods, 4);

        for cf in &out.cashflows[..3] {
            assert_eq!(cf.coupon, dec!(30));
            assert_eq!(cf.principal, Decimal::ZERO);
            assert_eq!(cf.total, dec!(30));
        }

        let last = &out.cashflows[3];
        assert_eq!(last.principal, dec!(1000));
        assert_eq!(last.total, dec!(1030));
        assert_eq!(last.years, dec!(2));

        // Period clocks advance by 1/freq years
        assert_eq!(out.cashflows[0].years, dec!(0.5));
    }

    // -----------------------------------------------------------------------
    // 6. Periodic coupon and rate derivation
    // -----------------------------------------------------------------------
    #[test]
    fn test_periodic_derivations() {
        let input = BondPricingInput {
            face_value: dec!(1000),
            coupon_rate: dec!(0.08),
            ytm: dec!(0.06),
            years_to_maturity: 3,
            payments_per_year: 4,
        };
        let result = price_bond(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.coupon_amount, dec!(20)); // 1000 * 0.08 / 4
        assert_eq!(out.periodic_rate, dec!(0.015)); // 0.06 / 4
        assert_eq!(out.num_periods, 12);
        assert_eq!(out.total_coupon_income, dec!(240));
    }

    // -----------------------------------------------------------------------
    // 7. Current yield at par equals the coupon rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_current_yield_at_par() {
        let input = semi_annual_bond(dec!(0.06), dec!(0.06));
        let result = price_bond(&input).unwrap();

        let diff = (result.result.current_yield - dec!(0.06)).abs();
        assert!(
            diff < dec!(0.0001),
            "Current yield at par should be ~6%, got {}",
            result.result.current_yield
        );
    }

    // -----------------------------------------------------------------------
    // 8. Invalid inputs
    // -----------------------------------------------------------------------
    #[test]
    fn test_invalid_face_value_error() {
        let mut input = semi_annual_bond(dec!(0.05), dec!(0.05));
        input.face_value = dec!(-100);

        let result = price_bond(&input);
        assert!(result.is_err());
        match result.unwrap_err() {
            ValuationError::InvalidInput { field, .. } => {
                assert_eq!(field, "face_value");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_years_rejected() {
        let mut input = semi_annual_bond(dec!(0.05), dec!(0.05));
        input.years_to_maturity = 0;
        assert!(price_bond(&input).is_err());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let mut input = semi_annual_bond(dec!(0.05), dec!(0.05));
        input.payments_per_year = 0;
        assert!(price_bond(&input).is_err());
    }

    #[test]
    fn test_extreme_negative_ytm_rejected() {
        let mut input = semi_annual_bond(dec!(0.05), dec!(0.05));
        input.ytm = dec!(-2.5);
        assert!(price_bond(&input).is_err());
    }

    // -----------------------------------------------------------------------
    // 9. Metadata populated
    // -----------------------------------------------------------------------
    #[test]
    fn test_metadata_populated() {
        let input = semi_annual_bond(dec!(0.05), dec!(0.05));
        let result = price_bond(&input).unwrap();

        assert!(result.methodology.contains("Bond pricing"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
        assert!(!result.metadata.version.is_empty());
    }
}

//! Level-payment mortgage amortization.
//!
//! Derives the level monthly payment from the annuity formula and walks the
//! schedule month by month with cent rounding. The final month retires the
//! remaining balance exactly, so cumulative rounding drift never leaves a
//! residual balance. Zero-rate loans degrade to straight-line repayment
//! (`principal / n`) instead of dividing by zero.
//! All math in `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ValuationError;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::ValuationResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: u32 = 12;

/// Longest term accepted before the input is treated as a typo.
const MAX_TERM_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a level-payment amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    /// Loan principal
    pub principal: Money,
    /// Annual interest rate as a decimal (e.g. 0.06 = 6%)
    pub annual_rate: Rate,
    /// Loan term in whole years
    pub term_years: u32,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Month index, 1-based.
    pub month: u32,
    /// Interest portion of the payment.
    pub interest: Money,
    /// Principal portion of the payment.
    pub principal: Money,
    /// Total payment for the month.
    pub payment: Money,
    /// Remaining balance after the payment.
    pub balance: Money,
}

/// Output of the amortization computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    /// Level monthly payment
    pub monthly_payment: Money,
    /// Total number of monthly payments
    pub num_payments: u32,
    /// Total interest paid over the life of the loan
    pub total_interest: Money,
    /// Total of all payments
    pub total_paid: Money,
    /// Month-by-month schedule
    pub schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full amortization schedule for a level-payment loan.
pub fn calculate_amortization(
    input: &AmortizationInput,
) -> ValuationResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let num_payments = input.term_years * MONTHS_PER_YEAR;
    let monthly_rate = input.annual_rate / dec!(12);

    // Level payment from the annuity formula. pmt() returns the payment as an
    // outflow, so flip the sign; the zero-rate branch inside pmt() handles
    // interest-free loans as principal / n.
    let raw_payment =
        -time_value::pmt(monthly_rate, num_payments, input.principal, Decimal::ZERO)?;
    let monthly_payment = round_cents(raw_payment);

    let mut schedule = Vec::with_capacity(num_payments as usize);
    let mut balance = input.principal;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=num_payments {
        let (interest, principal_portion) = if month == num_payments {
            // Final month: retire the remaining balance exactly and
            // back-derive interest, absorbing accumulated rounding drift.
            (monthly_payment - balance, balance)
        } else {
            let interest = round_cents(balance * monthly_rate);
            (interest, monthly_payment - interest)
        };

        // Floor at zero: rounding must never leave a negative balance
        balance = (balance - principal_portion).max(Decimal::ZERO);
        total_interest += interest;

        schedule.push(AmortizationRow {
            month,
            interest,
            principal: principal_portion,
            payment: monthly_payment,
            balance,
        });
    }

    let output = AmortizationOutput {
        monthly_payment,
        num_payments,
        total_interest,
        total_paid: monthly_payment * Decimal::from(num_payments),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Level-payment amortization — annuity payment with cent rounding and final-month adjustment",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &AmortizationInput) -> ValuationResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(ValuationError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(ValuationError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.term_years == 0 {
        return Err(ValuationError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    if input.term_years > MAX_TERM_YEARS {
        return Err(ValuationError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term exceeds {MAX_TERM_YEARS} years — likely an error"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Round a monetary amount to cents.
fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

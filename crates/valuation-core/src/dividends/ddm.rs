//! Dividend discount valuation.
//!
//! Projects dividends over a fixed horizon under three parallel assumptions
//! (flat, constant growth, two-stage growth) and values the share under each:
//! zero-growth perpetuity, Gordon Growth, and a two-stage model with a Gordon
//! terminal value at the end of the high-growth stage.
//!
//! A valuation whose `g < r` precondition fails is reported as `None` on that
//! field only; the projection series and the remaining prices stay valid.
//! Callers must render `None` as "requires g < r", never as zero or infinity.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValuationError;
use crate::types::{Money, Rate};
use crate::ValuationResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Input for the dividend discount valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdmInput {
    /// Current annual dividend per share (D₀).
    pub d0: Money,
    /// Required rate of return (cost of equity).
    pub r: Rate,
    /// Perpetual growth rate for the constant-growth (Gordon) model.
    pub g_const: Rate,
    /// Growth rate during the initial high-growth stage.
    pub g_short: Rate,
    /// Perpetual growth rate after the initial stage.
    pub g_long: Rate,
    /// Duration of the initial high-growth stage in years.
    pub short_years: u32,
    /// Projection horizon in years for the year-by-year series.
    pub horizon_years: u32,
}

/// Dividend projection for one year under all three growth assumptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendYearPoint {
    /// Year number (1-indexed).
    pub year: u32,
    /// Flat dividend (D₀ held constant).
    pub flat: Money,
    /// Dividend compounding at the constant growth rate.
    pub constant_growth: Money,
    /// Dividend compounding at the short-term rate, then the long-term rate.
    pub two_stage: Money,
}

/// Output of the dividend discount valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdmOutput {
    /// Zero-growth perpetuity value: D₀ / r.
    pub price_no_growth: Money,
    /// Gordon Growth value: D₀(1+g)/(r−g). `None` when g_const ≥ r.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_gordon: Option<Money>,
    /// Two-stage value. `None` when g_long ≥ r.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_two_stage: Option<Money>,
    /// Gordon terminal value at the end of the initial stage (undiscounted).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_value: Option<Money>,
    /// Present value of the terminal value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_value_pv: Option<Money>,
    /// Year-by-year dividend projection under all three assumptions.
    pub projection: Vec<DividendYearPoint>,
    /// Preconditions that failed (growth at or above the required return).
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project dividends and value the share under all three discount models.
pub fn calculate_ddm(input: &DdmInput) -> ValuationResult<DdmOutput> {
    validate_input(input)?;

    let mut warnings: Vec<String> = Vec::new();

    let projection = project_dividends(input);

    let price_no_growth = input.d0 / input.r;

    let price_gordon = if input.g_const < input.r {
        Some(input.d0 * (Decimal::ONE + input.g_const) / (input.r - input.g_const))
    } else {
        warnings.push(
            "Gordon Growth value undefined: constant growth rate must be below the required return"
                .into(),
        );
        None
    };

    let (price_two_stage, terminal_value, terminal_value_pv) = if input.g_long < input.r {
        let (price, tv, tv_pv) = two_stage_value(input);
        (Some(price), Some(tv), Some(tv_pv))
    } else {
        warnings.push(
            "Two-stage value undefined: long-term growth rate must be below the required return"
                .into(),
        );
        (None, None, None)
    };

    Ok(DdmOutput {
        price_no_growth,
        price_gordon,
        price_two_stage,
        terminal_value,
        terminal_value_pv,
        projection,
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Year-by-year dividends for years 1..=horizon. The two-stage series grows
/// at the short-term rate through `short_years` and at the long-term rate
/// thereafter; a stage longer than the horizon simply never switches.
fn project_dividends(input: &DdmInput) -> Vec<DividendYearPoint> {
    let mut projection = Vec::with_capacity(input.horizon_years as usize);

    let mut constant = input.d0;
    let mut two_stage = input.d0;

    for year in 1..=input.horizon_years {
        constant *= Decimal::ONE + input.g_const;

        let g = if year <= input.short_years {
            input.g_short
        } else {
            input.g_long
        };
        two_stage *= Decimal::ONE + g;

        projection.push(DividendYearPoint {
            year,
            flat: input.d0,
            constant_growth: constant,
            two_stage,
        });
    }

    projection
}

// ---------------------------------------------------------------------------
// Two-stage valuation
// ---------------------------------------------------------------------------

/// PV of the high-growth dividends plus the discounted Gordon terminal value.
/// Returns (price, terminal value, PV of terminal value). Caller guarantees
/// g_long < r.
fn two_stage_value(input: &DdmInput) -> (Money, Money, Money) {
    let one_plus_r = Decimal::ONE + input.r;

    let mut dividend = input.d0;
    let mut discount = Decimal::ONE;
    let mut stage_pv = Decimal::ZERO;

    for _ in 0..input.short_years {
        dividend *= Decimal::ONE + input.g_short;
        discount *= one_plus_r;
        stage_pv += dividend / discount;
    }

    // Terminal value on the first long-stage dividend, discounted back over
    // the explicit stage
    let terminal_dividend = dividend * (Decimal::ONE + input.g_long);
    let terminal_value = terminal_dividend / (input.r - input.g_long);
    let terminal_value_pv = terminal_value / discount;

    (stage_pv + terminal_value_pv, terminal_value, terminal_value_pv)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &DdmInput) -> ValuationResult<()> {
    if input.d0 < Decimal::ZERO {
        return Err(ValuationError::InvalidInput {
            field: "d0".into(),
            reason: "Current dividend must be non-negative".into(),
        });
    }
    if input.r <= Decimal::ZERO {
        return Err(ValuationError::InvalidInput {
            field: "r".into(),
            reason: "Required rate of return must be positive".into(),
        });
    }
    for (field, g) in [
        ("g_const", input.g_const),
        ("g_short", input.g_short),
        ("g_long", input.g_long),
    ] {
        if g <= Decimal::NEGATIVE_ONE {
            return Err(ValuationError::InvalidInput {
                field: field.into(),
                reason: "Growth rate must be greater than -100%".into(),
            });
        }
    }
    if input.short_years == 0 {
        return Err(ValuationError::InvalidInput {
            field: "short_years".into(),
            reason: "High-growth stage must last at least 1 year".into(),
        });
    }
    if input.horizon_years == 0 {
        return Err(ValuationError::InvalidInput {
            field: "horizon_years".into(),
            reason: "Projection horizon must be at least 1 year".into(),
        });
    }
    if input.horizon_years > 200 {
        return Err(ValuationError::InvalidInput {
            field: "horizon_years".into(),
            reason: "Projection horizon exceeds 200 years — likely an error".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

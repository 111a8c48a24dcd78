use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use valuation_core::fixed_income::bonds::{self, BondPricingInput};

use crate::input;

/// Arguments for bond pricing
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BondArgs {
    /// Par / face value (defaults to 1000)
    #[arg(long)]
    pub face_value: Option<Decimal>,

    /// Annual coupon rate (e.g. 0.05 for 5%)
    #[arg(long)]
    pub coupon_rate: Option<Decimal>,

    /// Annual yield to maturity (e.g. 0.045 for 4.5%)
    #[arg(long)]
    pub ytm: Option<Decimal>,

    /// Whole years to maturity
    #[arg(long)]
    pub years: Option<u32>,

    /// Coupon payments per year
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_bond(args: BondArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bond_input: BondPricingInput = if let Some(ref path) = args.input {
        input::read_json_file(path)?
    } else if let Some(data) = input::read_stdin_json()? {
        serde_json::from_value(data)?
    } else {
        BondPricingInput {
            face_value: args.face_value.unwrap_or(dec!(1000)),
            coupon_rate: args
                .coupon_rate
                .ok_or("--coupon-rate is required (or provide --input)")?,
            ytm: args.ytm.ok_or("--ytm is required (or provide --input)")?,
            years_to_maturity: args
                .years
                .ok_or("--years is required (or provide --input)")?,
            payments_per_year: args.frequency,
        }
    };

    let output = bonds::price_bond(&bond_input)?;
    Ok(serde_json::to_value(&output)?)
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use valuation_core::mortgage::amortization::{self, AmortizationInput};

use crate::input;

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct AmortizeArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate (e.g. 0.06 for 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in whole years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amort_input: AmortizationInput = if let Some(ref path) = args.input {
        input::read_json_file(path)?
    } else if let Some(data) = input::read_stdin_json()? {
        serde_json::from_value(data)?
    } else {
        AmortizationInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args
                .years
                .ok_or("--years is required (or provide --input)")?,
        }
    };

    let output = amortization::calculate_amortization(&amort_input)?;
    Ok(serde_json::to_value(&output)?)
}

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use valuation_core::dividends::ddm::{self, DdmInput};

use crate::input;

/// Arguments for dividend discount valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DdmArgs {
    /// Current annual dividend per share (D0)
    #[arg(long)]
    pub dividend: Option<Decimal>,

    /// Required rate of return (e.g. 0.10 for 10%)
    #[arg(long, alias = "r")]
    pub required_return: Option<Decimal>,

    /// Perpetual growth rate for the Gordon model
    #[arg(long)]
    pub growth: Option<Decimal>,

    /// Growth rate during the initial high-growth stage
    #[arg(long)]
    pub short_growth: Option<Decimal>,

    /// Perpetual growth rate after the initial stage
    #[arg(long)]
    pub long_growth: Option<Decimal>,

    /// Duration of the initial stage in years
    #[arg(long, default_value = "5")]
    pub short_years: u32,

    /// Projection horizon in years
    #[arg(long, default_value = "10")]
    pub horizon: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_ddm(args: DdmArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ddm_input: DdmInput = if let Some(ref path) = args.input {
        input::read_json_file(path)?
    } else if let Some(data) = input::read_stdin_json()? {
        serde_json::from_value(data)?
    } else {
        DdmInput {
            d0: args
                .dividend
                .ok_or("--dividend is required (or provide --input)")?,
            r: args
                .required_return
                .ok_or("--required-return is required (or provide --input)")?,
            g_const: args
                .growth
                .ok_or("--growth is required (or provide --input)")?,
            g_short: args
                .short_growth
                .ok_or("--short-growth is required (or provide --input)")?,
            g_long: args
                .long_growth
                .ok_or("--long-growth is required (or provide --input)")?,
            short_years: args.short_years,
            horizon_years: args.horizon,
        }
    };

    let output = ddm::calculate_ddm(&ddm_input)?;
    Ok(serde_json::to_value(&output)?)
}

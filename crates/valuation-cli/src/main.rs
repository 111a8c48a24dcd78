mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::bond::BondArgs;
use commands::dividends::DdmArgs;
use commands::mortgage::AmortizeArgs;

/// Closed-form valuation models with decimal precision
#[derive(Parser)]
#[command(
    name = "fvm",
    version,
    about = "Bond, mortgage, and dividend valuation models",
    long_about = "A CLI for exploring three closed-form valuation models with \
                  decimal precision: level-coupon bond pricing, level-payment \
                  mortgage amortization, and dividend discount valuation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a level-coupon bond and list its cash flows
    Bond(BondArgs),
    /// Build a level-payment mortgage amortization schedule
    Amortize(AmortizeArgs),
    /// Value a share under three dividend discount models
    Ddm(DdmArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Bond(args) => commands::bond::run_bond(args),
        Commands::Amortize(args) => commands::mortgage::run_amortize(args),
        Commands::Ddm(args) => commands::dividends::run_ddm(args),
        Commands::Version => {
            println!("fvm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

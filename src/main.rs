//! Stoich - Chemical Equation Balancer
//!
//! Balances equations given as arguments, or one per line on stdin.
//!
//! # Usage
//!
//! ```bash
//! stoich "H2 + O2 -> H2O" "Fe + O2 -> Fe2O3"
//! cat equations.txt | stoich --lenient
//! ```

use std::process::ExitCode;

use clap::Parser;
use stoich_core::{
    batch::{process_equations, process_stdin},
    error::Result,
    BalancerConfig, EquationBalancer, ParseMode, DEFAULT_MAX_MULTIPLIER,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Chemical equation balancer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Equations to balance, e.g. "H2 + O2 -> H2O". Reads stdin when omitted.
    #[arg(value_name = "EQUATION")]
    equations: Vec<String>,

    /// Skip characters and digits the formula grammar does not recognize
    #[arg(long)]
    lenient: bool,

    /// Skip the regex pre-validation step
    #[arg(long)]
    no_validate: bool,

    /// Largest multiplier tried when clearing fractional coefficients
    #[arg(long, default_value_t = DEFAULT_MAX_MULTIPLIER)]
    max_multiplier: u64,

    /// Log solver diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "stoich_core=debug"
    } else {
        "stoich_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let parse_mode = if args.lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };
    let config = BalancerConfig::new()
        .with_parse_mode(parse_mode)
        .with_validation(!args.no_validate)
        .with_max_multiplier(args.max_multiplier);
    let balancer = EquationBalancer::with_config(config);

    let summary = if args.equations.is_empty() {
        process_stdin(&balancer)?
    } else {
        process_equations(&balancer, &args.equations)?
    };

    if summary.all_balanced() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

//! Payment Gateway CLI
//!
//! An interactive menu for creating, processing and checking simulated
//! payments. Nothing is persisted between runs.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --seed 42 --success-rate 0.7
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use log::info;
use payment_gateway::{Console, GatewayConfig, PaymentGateway, PaymentWorkflow, Result};
use std::io;
use std::process;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for payment ids and outcomes, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that processing a payment succeeds
    #[arg(long, default_value_t = GatewayConfig::DEFAULT_SUCCESS_RATE)]
    success_rate: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = GatewayConfig {
        seed: cli.seed,
        success_rate: cli.success_rate,
        ..GatewayConfig::default()
    };
    let gateway = PaymentGateway::new(config)?;
    info!("Starting payment gateway with {:?}", gateway.config());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(PaymentWorkflow::new(gateway), stdin.lock(), stdout.lock());
    console.run()
}

mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::cart::CartArgs;
use commands::classify::ClassifyArgs;
use commands::dashboard::DashboardArgs;
use commands::lookup::LookupArgs;

/// What tariffs actually cost you at checkout
#[derive(Parser)]
#[command(
    name = "tariff",
    version,
    about = "Estimate the hidden tariff cost in consumer purchases",
    long_about = "Estimates the total effective import tariff on consumer products \
                  with decimal precision: schedule base rates, trade-war and security \
                  surcharges, trade-agreement adjustments, and the share retailers \
                  pass through to the shelf price."
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
    /// Quote the total effective tariff for a classification code and origin
    Lookup(LookupArgs),
    /// Classify a free-text product description and quote its tariff
    Classify(ClassifyArgs),
    /// Analyze a shopping cart and aggregate its hidden tariff cost
    Cart(CartArgs),
    /// Summarize past purchases into an annualized tariff-burden report
    Dashboard(DashboardArgs),
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
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Lookup(args) => commands::lookup::run_lookup(args),
        Commands::Classify(args) => commands::classify::run_classify(args),
        Commands::Cart(args) => commands::cart::run_cart(args),
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args),
        Commands::Version => {
            println!("tariff {}", env!("CARGO_PKG_VERSION"));
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

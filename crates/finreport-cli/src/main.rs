mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::indicators::{IndicatorsArgs, TrendsArgs};
use commands::report::{BriefArgs, ReportArgs};
use commands::risk::RiskArgs;

/// Financial statement risk indicators
#[derive(Parser)]
#[command(
    name = "finreport",
    version,
    about = "Financial statement risk indicators",
    long_about = "Computes profitability, solvency, operations and cash flow indicators \
                  from a company's statement export (JSON or CSV row), compares years, \
                  grades risk per dimension and assembles report data."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate indicators for every loaded year
    Indicators(IndicatorsArgs),
    /// Compare the most recent year with the previous one
    Trends(TrendsArgs),
    /// Grade risk per dimension for the most recent year
    Risk(RiskArgs),
    /// Build structured briefs for a narrative writer
    Brief(BriefArgs),
    /// Assemble indicators, display strings, trends, risk and briefs
    Report(ReportArgs),
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

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine_config = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Indicators(args) => commands::indicators::run_indicators(args, &engine_config),
        Commands::Trends(args) => commands::indicators::run_trends(args, &engine_config),
        Commands::Risk(args) => commands::risk::run_risk(args, &engine_config),
        Commands::Brief(args) => commands::report::run_brief(args, &engine_config),
        Commands::Report(args) => commands::report::run_report(args, &engine_config),
        Commands::Version => {
            println!("finreport {}", env!("CARGO_PKG_VERSION"));
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

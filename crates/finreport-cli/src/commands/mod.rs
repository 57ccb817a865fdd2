pub mod indicators;
pub mod report;
pub mod risk;

use clap::Args;

/// Input selection shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to a JSON (template row or fiscal-year list) or CSV file;
    /// reads stdin when omitted
    #[arg(long)]
    pub input: Option<String>,
}

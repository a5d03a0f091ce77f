//! CLI argument definitions for the studio binary.

use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

/// Bullpen studio CLI.
///
/// Flags override whatever the configuration file says; the file itself
/// is optional and an absent flag leaves the file's value alone.
#[derive(Parser, Debug)]
#[command(
    name = "bullpen-studio",
    version,
    about = "Bullpen -- a one-room software studio on simulated wall-clock time"
)]
pub struct Cli {
    /// Project brief handed to the crew (what the studio should build)
    pub brief: String,

    /// Output directory for run artifacts; must not already exist
    #[arg(short, long, value_name = "PATH")]
    pub out: PathBuf,

    /// YAML configuration file; absent fields fall back to defaults
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of simulated workdays
    #[arg(long)]
    pub days: Option<u32>,

    /// Answer language-model calls with a canned reply at zero cost
    #[arg(long)]
    pub offline: bool,

    /// Skip the Docker syntax check and record a canned passing report
    #[arg(long)]
    pub skip_sandbox: bool,

    /// Real seconds per simulated hour; zero runs the day flat out
    #[arg(long, value_name = "SECONDS")]
    pub pace: Option<f64>,

    /// Spending ceiling for language-model calls, in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub budget: Option<Decimal>,

    /// Seed for the gossip dice; omit for an OS-seeded run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log format (pretty, json)
    #[arg(long, default_value = "pretty", value_name = "FORMAT")]
    pub log_format: String,
}

//! Studio binary entry point for the Bullpen workday simulator.
//!
//! Parses CLI flags, loads YAML configuration, guards the output
//! directory, then hands the project brief to [`bullpen_core::Studio`]
//! and prints where the artifacts landed.
//!
//! The credential for online runs comes from `OPENROUTER_API_KEY`; it
//! is the only environment-sourced value and is required exactly when
//! the language-model backend is not offline.

mod cli;

use anyhow::{Context as _, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bullpen_core::{Studio, StudioConfig};

use crate::cli::Cli;

/// Application entry point.
///
/// Initializes logging, loads configuration, applies CLI overrides,
/// creates the output directory, then runs one studio engagement and
/// prints the exit report.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the output
/// directory already exists, the API credential is missing for an
/// online run, or the simulation itself fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Initialize structured logging.
    install_logging(&cli.log_format)?;

    info!("bullpen-studio starting");

    // 2. Load configuration and fold in the CLI overrides.
    let config = load_config(&cli)?;
    info!(
        days = config.days,
        budget = %config.budget,
        seconds_per_hour = config.seconds_per_hour,
        offline = config.llm.offline,
        skip_sandbox = config.skip_sandbox,
        "Configuration loaded"
    );

    // 3. Guard the output directory. A re-used directory would mix two
    //    runs' artifacts, so an existing path is refused outright.
    if cli.out.exists() {
        bail!(
            "output directory {} already exists, pick a fresh one",
            cli.out.display()
        );
    }
    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;
    info!(out = %cli.out.display(), "Output directory created");

    // 4. Fetch the API credential. Offline runs never touch the
    //    network and skip it.
    let api_key = fetch_api_key(config.llm.offline)?;

    // 5. Assemble the studio.
    let mut studio = Studio::launch(cli.brief, config, &cli.out, api_key)
        .await
        .context("assembling the studio")?;

    // 6. Run the engagement.
    let summary = studio.run().await.context("running the engagement")?;

    // 7. Print the exit report.
    println!("Run {} finished: {}", summary.run_id, summary.end_reason);
    println!("  events executed : {}", summary.events_executed);
    println!("  final sim time  : {}h", summary.final_time);
    println!("  crew morale     : {:.1}", summary.final_morale);
    println!("  crew fatigue    : {:.1}", summary.final_fatigue);
    println!("  total spend     : ${:.4}", summary.total_spent);
    println!("  timeline        : {}", studio.timeline_path().display());
    println!("  gossip log      : {}", studio.gossip_path().display());

    info!("bullpen-studio shutdown complete");
    Ok(())
}

/// Install the tracing subscriber in the requested format.
///
/// Level filtering comes from `RUST_LOG`, falling back to `info`.
fn install_logging(format: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        "pretty" => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        other => bail!("unknown log format {other:?}, expected \"pretty\" or \"json\""),
    }
    Ok(())
}

/// Load configuration from the given file (or defaults when no file
/// was named) and fold in the CLI overrides, then validate the result.
fn load_config(cli: &Cli) -> anyhow::Result<StudioConfig> {
    let mut config = match &cli.config {
        Some(path) => StudioConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => StudioConfig::default(),
    };

    if let Some(days) = cli.days {
        config.days = days;
    }
    if let Some(pace) = cli.pace {
        config.seconds_per_hour = pace;
    }
    if let Some(budget) = cli.budget {
        config.budget = budget;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if cli.offline {
        config.llm.offline = true;
    }
    if cli.skip_sandbox {
        config.skip_sandbox = true;
    }

    config.validate().context("validating configuration")?;
    Ok(config)
}

/// Read `OPENROUTER_API_KEY` from the environment.
fn fetch_api_key(offline: bool) -> anyhow::Result<Option<String>> {
    resolve_api_key(std::env::var("OPENROUTER_API_KEY").ok(), offline)
}

/// Decide what to do with the credential the environment offered.
///
/// An unset or empty variable aborts an online run; offline runs carry
/// on without a credential.
fn resolve_api_key(env_value: Option<String>, offline: bool) -> anyhow::Result<Option<String>> {
    match env_value {
        Some(key) if !key.is_empty() => Ok(Some(key)),
        _ if offline => Ok(None),
        _ => bail!("OPENROUTER_API_KEY is not set; export it or pass --offline"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write as _;

    use rust_decimal::Decimal;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults_survive_when_no_flags_are_given() {
        let cli = parse(&["bullpen-studio", "brief", "--out", "runs/a"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn flags_override_the_defaults() {
        let cli = parse(&[
            "bullpen-studio",
            "brief",
            "--out",
            "runs/b",
            "--days",
            "2",
            "--budget",
            "3.50",
            "--seed",
            "11",
            "--offline",
            "--skip-sandbox",
            "--pace",
            "0",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.days, 2);
        assert_eq!(config.budget, Decimal::new(350, 2));
        assert_eq!(config.seed, Some(11));
        assert!(config.llm.offline);
        assert!(config.skip_sandbox);
        assert!(config.seconds_per_hour.abs() < f64::EPSILON);
    }

    #[test]
    fn flags_override_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "days: 5\nbudget: 9.00\nseconds_per_hour: 2.0").unwrap();

        let path = file.path().display().to_string();
        let cli = parse(&[
            "bullpen-studio",
            "brief",
            "--out",
            "runs/c",
            "--config",
            &path,
            "--days",
            "1",
        ]);
        let config = load_config(&cli).unwrap();

        // --days wins over the file, untouched file values survive.
        assert_eq!(config.days, 1);
        assert_eq!(config.budget, Decimal::new(900, 2));
        assert!((config.seconds_per_hour - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_override_combination_is_rejected() {
        let cli = parse(&["bullpen-studio", "brief", "--out", "runs/d", "--days", "0"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = parse(&[
            "bullpen-studio",
            "brief",
            "--out",
            "runs/e",
            "--config",
            "does-not-exist.yaml",
        ]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn offline_runs_need_no_credential() {
        assert!(resolve_api_key(None, true).unwrap().is_none());
        assert!(resolve_api_key(Some(String::new()), true).unwrap().is_none());
    }

    #[test]
    fn online_runs_require_a_credential() {
        assert!(resolve_api_key(None, false).is_err());
        assert!(resolve_api_key(Some(String::new()), false).is_err());
        assert_eq!(
            resolve_api_key(Some(String::from("sk-test")), false).unwrap(),
            Some(String::from("sk-test"))
        );
    }
}

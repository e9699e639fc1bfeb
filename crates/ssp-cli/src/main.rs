//! # ssp CLI entry point
//!
//! Parses command-line arguments, loads the run configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ssp_cli::assess::{run_assess, AssessArgs};
use ssp_cli::columns::{run_columns, ColumnsArgs};
use ssp_cli::config::AssessConfig;
use ssp_cli::evidence::{run_evidence, EvidenceArgs};

/// SSP assessment CLI.
///
/// Fills the outcome columns of a System Security Plan workbook from
/// evidence found in a test system export, and explains individual
/// control decisions.
#[derive(Parser, Debug)]
#[command(name = "ssp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess applicable controls and write a timestamped workbook copy.
    Assess(AssessArgs),

    /// Show ranked evidence and the decision for a single control.
    Evidence(EvidenceArgs),

    /// Show how the workbook's header row maps to the SSP columns.
    Columns(ColumnsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Relative inputs resolve against the config file's directory first.
    let base = cli
        .config
        .as_deref()
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    tracing::debug!(base = %base.display(), "resolved base directory");

    let result = AssessConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Assess(args) => run_assess(&args, &config, &base),
        Commands::Evidence(args) => run_evidence(&args, &config, &base),
        Commands::Columns(args) => run_columns(&args, &config, &base),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

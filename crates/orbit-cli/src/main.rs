//! # orbit CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use orbit_cli::assess::{run_assess, AssessArgs};
use orbit_cli::catalog::{run_catalog, CatalogArgs};
use orbit_cli::classify::{run_classify, ClassifyArgs};
use orbit_cli::incident::{run_incident, IncidentArgs};
use orbit_cli::overlap::{run_overlap, OverlapArgs};
use orbit_cli::{OutputFormat, EXIT_ERROR};

/// Orbit Compliance CLI
///
/// Classifies space operators under EU Space Act, NIS2, COPUOS/IADC, export
/// control, and spectrum rules; scores assessments; classifies incidents.
#[derive(Parser, Debug)]
#[command(name = "orbit", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a profile and list applicable requirements.
    Classify(ClassifyArgs),

    /// Score a profile against recorded statuses and list gaps.
    Assess(AssessArgs),

    /// Classify an incident and compute notification deadlines.
    Incident(IncidentArgs),

    /// Find shared controls across several frameworks.
    Overlap(OverlapArgs),

    /// Show catalog versions, or one catalog's requirements.
    Catalog(CatalogArgs),
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
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Classify(args) => run_classify(args, cli.format),
        Commands::Assess(args) => run_assess(args, cli.format),
        Commands::Incident(args) => run_incident(args, cli.format),
        Commands::Overlap(args) => run_overlap(args, cli.format),
        Commands::Catalog(args) => run_catalog(args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

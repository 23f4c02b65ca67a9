//! # Assess: score, gaps, and recommendations for a profile.
//!
//! ```bash
//! orbit assess nis2 operator.yaml --statuses statuses.json --as-of 2026-06-01 --fail-on high
//! ```
//!
//! Without `--fail-on` the command always exits 0 on a successful run.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use serde_json::Value;

use orbit_core::{Framework, Severity};
use orbit_rules::{assess_value, AssessmentReport, StatusMap};

use crate::{load_document, render, OutputFormat, EXIT_FINDINGS, EXIT_OK};

/// Lowest gap severity that fails the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    Critical,
    High,
    Low,
}

impl From<FailOn> for Severity {
    fn from(f: FailOn) -> Self {
        match f {
            FailOn::Critical => Severity::Critical,
            FailOn::High => Severity::High,
            FailOn::Low => Severity::Low,
        }
    }
}

/// Arguments for `orbit assess`.
#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Framework (eu_space_act, nis2, copuos, export_control, spectrum).
    pub framework: String,
    /// Questionnaire file, JSON or YAML.
    pub profile: PathBuf,
    /// Recorded statuses: a map of requirement id to status.
    #[arg(long)]
    pub statuses: Option<PathBuf>,
    /// Reference date for recommendation targets (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,
    /// Exit 1 when a gap at or above this severity is open.
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOn>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// Execute `orbit assess`.
pub fn run_assess(args: &AssessArgs, format: OutputFormat) -> Result<u8> {
    let framework: Framework = args.framework.parse()?;
    let questionnaire: Value = load_document(&args.profile)?;
    let statuses: StatusMap = match &args.statuses {
        Some(path) => load_document(path)?,
        None => StatusMap::new(),
    };
    let as_of: DateTime<Utc> = match args.as_of {
        Some(date) => date
            .and_hms_opt(0, 0, 0)
            .context("invalid --as-of date")?
            .and_utc(),
        None => Utc::now(),
    };

    let report = assess_value(framework, &questionnaire, &statuses, as_of)?;
    println!("{}", render(format, &report, render_text)?);

    let code = exit_code(&report, args.fail_on);
    if code != EXIT_OK {
        tracing::warn!(
            framework = %framework,
            gaps = report.gaps.len(),
            "open gaps at or above the failure threshold"
        );
    }
    Ok(code)
}

/// `EXIT_FINDINGS` when any gap is at least as severe as `fail_on`.
pub fn exit_code(report: &AssessmentReport, fail_on: Option<FailOn>) -> u8 {
    let Some(threshold) = fail_on.map(Severity::from) else {
        return EXIT_OK;
    };
    if report
        .gaps
        .iter()
        .any(|g| g.severity.rank() <= threshold.rank())
    {
        EXIT_FINDINGS
    } else {
        EXIT_OK
    }
}

/// Text rendering of a report.
pub fn render_text(report: &AssessmentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (catalog {})",
        report.framework.title(),
        report.catalog_version
    );
    let _ = writeln!(
        out,
        "Score: {}/100  Risk: {}  Applicable: {}  Unassessed: {}",
        report.score.score,
        report.risk_level,
        report.applicable.len(),
        report.unassessed.len()
    );

    if report.gaps.is_empty() {
        let _ = writeln!(out, "No open gaps.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Gaps ({}):", report.gaps.len());
    for g in &report.gaps {
        let _ = writeln!(
            out,
            "  [{:<8}] {:<22} {:<13} {}",
            g.severity.to_string(),
            g.requirement_id,
            g.status.to_string(),
            g.title
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations:");
    for r in &report.recommendations {
        let _ = writeln!(out, "  {} by {}: {}", r.priority, r.target_date, r.text);
    }
    out
}

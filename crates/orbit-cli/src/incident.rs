//! # Incident: severity and notification deadlines for an incident report.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use clap::Args;

use orbit_rules::{classify_incident, IncidentClassification, IncidentReport};

use crate::{load_document, render, wire_name, OutputFormat, EXIT_OK};

/// Arguments for `orbit incident`.
#[derive(Args, Debug)]
pub struct IncidentArgs {
    /// Incident report file, JSON or YAML.
    pub report: PathBuf,
    /// Evaluate deadlines as of this RFC 3339 instant instead of now.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
    /// Window, in days, in which a deadline counts as due soon.
    #[arg(long, default_value_t = 30)]
    pub due_soon_days: u32,
}

/// Execute `orbit incident`.
pub fn run_incident(args: &IncidentArgs, format: OutputFormat) -> Result<u8> {
    let report: IncidentReport = load_document(&args.report)?;
    let now = args.now.unwrap_or_else(Utc::now);
    let due_soon = Duration::days(i64::from(args.due_soon_days));

    let classification = classify_incident(&report, now, due_soon)?;
    tracing::debug!(
        severity = %classification.severity,
        notifications = classification.notifications.len(),
        "incident classified"
    );
    println!("{}", render(format, &classification, render_text)?);
    Ok(EXIT_OK)
}

/// Text rendering of an incident classification.
pub fn render_text(c: &IncidentClassification) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Incident: {}  Severity: {}",
        wire_name(&c.category),
        c.severity
    );
    if c.nis2_significant {
        let _ = writeln!(out, "NIS2 significant incident");
    }
    for reason in &c.reasons {
        let _ = writeln!(out, "  - {reason}");
    }
    if c.notifications.is_empty() {
        let _ = writeln!(out, "No notifications owed.");
        return out;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Notifications:");
    for n in &c.notifications {
        let _ = writeln!(
            out,
            "  {:<9} {} {:<34} to {}",
            wire_name(&n.status),
            n.deadline.due.format("%Y-%m-%d %H:%M UTC"),
            n.deadline.label,
            n.authority
        );
    }
    out
}

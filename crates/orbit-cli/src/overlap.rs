//! # Overlap: shared controls across frameworks.
//!
//! ```bash
//! orbit overlap nis2=operator.yaml eu_space_act=operator.yaml \
//!     --evidence nis2=nis2-statuses.json --evidence eu_space_act=esa-statuses.json
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use orbit_core::Framework;
use orbit_rules::{
    analyze_overlap, applicable_summaries, suggest_evidence_reuse, EvidenceReuse, OverlapReport,
    StatusMap,
};

use crate::{load_document, render, OutputFormat, EXIT_OK};

/// Arguments for `orbit overlap`.
#[derive(Args, Debug)]
pub struct OverlapArgs {
    /// `framework=profile` pairs, one per framework.
    #[arg(required = true, value_name = "FRAMEWORK=PROFILE")]
    pub profiles: Vec<String>,
    /// `framework=statuses` pairs; adds evidence-reuse suggestions.
    #[arg(long = "evidence", value_name = "FRAMEWORK=STATUSES")]
    pub evidence: Vec<String>,
}

/// Overlap report with optional evidence-reuse suggestions.
#[derive(Debug, Serialize)]
pub struct OverlapOutput {
    #[serde(flatten)]
    pub report: OverlapReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub evidence_reuse: Vec<EvidenceReuse>,
}

/// Split `framework=path` pairs, rejecting malformed and duplicate entries.
pub fn parse_pairs(raw: &[String]) -> Result<BTreeMap<Framework, PathBuf>> {
    let mut out = BTreeMap::new();
    for entry in raw {
        let Some((name, path)) = entry.split_once('=') else {
            bail!("expected FRAMEWORK=FILE, got {entry:?}");
        };
        if path.is_empty() {
            bail!("missing file for {name:?}");
        }
        let framework: Framework = name.parse()?;
        if out.insert(framework, PathBuf::from(path)).is_some() {
            bail!("framework {framework} is given more than once");
        }
    }
    Ok(out)
}

/// Execute `orbit overlap`.
pub fn run_overlap(args: &OverlapArgs, format: OutputFormat) -> Result<u8> {
    let profiles = parse_pairs(&args.profiles)?;
    let mut sets = Vec::with_capacity(profiles.len());
    for (framework, path) in &profiles {
        let questionnaire: Value = load_document(path)?;
        let applicable = applicable_summaries(*framework, &questionnaire)
            .with_context(|| format!("{framework} profile {}", path.display()))?;
        sets.push((*framework, applicable));
    }
    let report = analyze_overlap(&sets);

    let mut statuses: BTreeMap<Framework, StatusMap> = BTreeMap::new();
    for (framework, path) in parse_pairs(&args.evidence)? {
        statuses.insert(framework, load_document(&path)?);
    }
    let evidence_reuse = if statuses.is_empty() {
        Vec::new()
    } else {
        suggest_evidence_reuse(&statuses)
    };

    let output = OverlapOutput {
        report,
        evidence_reuse,
    };
    println!("{}", render(format, &output, render_text)?);
    Ok(EXIT_OK)
}

/// Text rendering of an overlap report.
pub fn render_text(output: &OverlapOutput) -> String {
    let r = &output.report;
    let mut out = String::new();
    let names: Vec<String> = r.frameworks.iter().map(|f| f.to_string()).collect();
    let _ = writeln!(out, "Frameworks: {}", names.join(", "));
    let _ = writeln!(
        out,
        "Requirements: {}  Distinct controls: {}  Effort reduction: {}%",
        r.total_requirements, r.distinct_controls, r.effort_reduction_percent
    );
    for o in &r.overlaps {
        let _ = writeln!(
            out,
            "  {:<24} {} requirements across {} frameworks",
            o.topic.to_string(),
            o.requirement_ids.len(),
            o.frameworks.len()
        );
    }
    if !r.cross_references.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Cross references:");
        for x in &r.cross_references {
            let _ = writeln!(out, "  {} <-> {}", x.from, x.to);
        }
    }
    if !output.evidence_reuse.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Evidence reuse:");
        for e in &output.evidence_reuse {
            let _ = writeln!(out, "  {} -> {}", e.source_id, e.target_id);
        }
    }
    out
}

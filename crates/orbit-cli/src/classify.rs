//! # Classify: framework classification of a profile file.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use orbit_core::Framework;
use orbit_rules::{classify_value, ClassificationResult};

use crate::{load_document, render, OutputFormat, EXIT_OK};

/// Arguments for `orbit classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Framework (eu_space_act, nis2, copuos, export_control, spectrum).
    pub framework: String,
    /// Questionnaire file, JSON or YAML.
    pub profile: PathBuf,
}

/// Execute `orbit classify`.
pub fn run_classify(args: &ClassifyArgs, format: OutputFormat) -> Result<u8> {
    let framework: Framework = args.framework.parse()?;
    let questionnaire: Value = load_document(&args.profile)?;
    let result = classify_value(framework, &questionnaire)?;
    println!("{}", render(format, &result, render_text)?);
    Ok(EXIT_OK)
}

/// Text rendering of a classification.
pub fn render_text(result: &ClassificationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.framework.title());
    if let Ok(Value::Object(fields)) = serde_json::to_value(&result.classification) {
        for (key, value) in fields.iter().filter(|(k, _)| k.as_str() != "framework") {
            let shown = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let _ = writeln!(out, "  {key:<28} {shown}");
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Applicable requirements ({}):", result.applicable.len());
    for r in &result.applicable {
        let _ = writeln!(out, "  [{:<8}] {:<22} {}", r.severity.to_string(), r.id, r.title);
    }
    out
}

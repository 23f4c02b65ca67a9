//! # orbit-cli: Command-Line Front End
//!
//! Provides the `orbit` command. Every subcommand reads JSON or YAML input
//! files, runs one of the `orbit-rules` engines, and prints the result as
//! JSON or as a short text summary.
//!
//! ## Subcommands
//!
//! - `orbit classify`: classification and applicable requirements.
//! - `orbit assess`: score, gaps, and recommendations; `--fail-on` turns
//!   open gaps into a non-zero exit code for CI.
//! - `orbit incident`: incident severity and notification deadlines.
//! - `orbit overlap`: shared controls across several frameworks.
//! - `orbit catalog`: catalog versions and requirement listings.
//!
//! ```bash
//! orbit classify nis2 operator.yaml
//! orbit assess eu-space-act operator.yaml --statuses statuses.json --fail-on critical
//! orbit overlap nis2=operator.yaml eu_space_act=operator.yaml --format text
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` findings at or above the `--fail-on` threshold, `2`
//! operational error (unreadable file, invalid profile, unknown framework).

pub mod assess;
pub mod catalog;
pub mod classify;
pub mod incident;
pub mod overlap;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Exit code for a clean run.
pub const EXIT_OK: u8 = 0;
/// Exit code when findings meet the failure threshold.
pub const EXIT_FINDINGS: u8 = 1;
/// Exit code for operational errors.
pub const EXIT_ERROR: u8 = 2;

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable summary.
    Text,
}

/// Read a JSON or YAML document. `.yaml` and `.yml` files are parsed as
/// YAML, everything else as JSON.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
    }
}

/// Wire name of a unit enum variant (`due_soon`, `eu_space_act`).
pub(crate) fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::from("?"),
    }
}

/// Render `value` as pretty JSON, or fall back to `text` for text output.
pub fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("failed to serialize output")
        }
        OutputFormat::Text => Ok(text(value)),
    }
}

//! # Regulatory Frameworks: Single Source of Truth
//!
//! Defines the [`Framework`] enum. Every engine, catalog, and route keys on
//! this one definition; the compiler enforces exhaustive `match`, so adding a
//! framework is a compile error until every dispatcher handles it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// A regulatory framework the stack can evaluate an operator against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    /// EU Space Act (authorization, registration, safety, resilience, sustainability).
    EuSpaceAct,
    /// NIS2 Directive (EU) 2022/2555: cybersecurity risk management and reporting.
    Nis2,
    /// UN COPUOS Long-Term Sustainability guidelines and IADC debris mitigation.
    Copuos,
    /// US export controls: ITAR (USML Category XV) and EAR (9x515).
    ExportControl,
    /// ITU Radio Regulations filings and national spectrum licensing.
    Spectrum,
}

impl Framework {
    /// The total number of frameworks.
    pub const COUNT: usize = 5;

    /// Return all frameworks as a slice, in canonical order.
    pub fn all() -> &'static [Framework] {
        &[
            Self::EuSpaceAct,
            Self::Nis2,
            Self::Copuos,
            Self::ExportControl,
            Self::Spectrum,
        ]
    }

    /// The snake_case identifier used on the wire and in cross references.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EuSpaceAct => "eu_space_act",
            Self::Nis2 => "nis2",
            Self::Copuos => "copuos",
            Self::ExportControl => "export_control",
            Self::Spectrum => "spectrum",
        }
    }

    /// Human-readable name for reports.
    pub fn title(&self) -> &'static str {
        match self {
            Self::EuSpaceAct => "EU Space Act",
            Self::Nis2 => "NIS2 Directive",
            Self::Copuos => "COPUOS / IADC Debris Mitigation",
            Self::ExportControl => "ITAR / EAR Export Control",
            Self::Spectrum => "Spectrum & ITU Filings",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = OrbitError;

    /// Parse a framework name. Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Framework::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| OrbitError::UnknownFramework(s.to_string()))
    }
}

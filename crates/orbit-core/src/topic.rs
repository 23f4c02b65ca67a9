//! # Control Topics
//!
//! Closed vocabulary of control areas shared across frameworks. Every
//! catalog requirement is tagged with exactly one topic; cross-regulation
//! overlap analysis groups requirements by it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A control area that one implemented measure can satisfy in several frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlTopic {
    /// Management accountability, policies, training of the management body.
    Governance,
    /// Risk analysis and information security policy.
    RiskManagement,
    /// Detection, handling, and notification of incidents.
    IncidentReporting,
    /// Backups, disaster recovery, crisis management.
    BusinessContinuity,
    /// Supplier and service-provider security.
    SupplyChain,
    /// Encryption and key management, including command links.
    Cryptography,
    /// Identity, access control, multi-factor authentication.
    AccessControl,
    /// Secure development and vulnerability handling.
    VulnerabilityManagement,
    /// Staff awareness and training programmes.
    Training,
    /// Registration with an authority or registry.
    Registration,
    /// Licences, authorizations, and classification determinations.
    Authorization,
    /// Third-party liability cover.
    Insurance,
    /// Limiting debris released during operations and break-ups.
    DebrisMitigation,
    /// Conjunction assessment and collision avoidance.
    CollisionAvoidance,
    /// Tracking, orbital data sharing, space situational awareness.
    SpaceSituationalAwareness,
    /// Passivation of stored energy at end of life.
    Passivation,
    /// Post-mission disposal and re-entry safety.
    EndOfLife,
    /// Environmental footprint and astronomical impact.
    Environmental,
    /// ITU filings and radio licensing.
    SpectrumFiling,
    /// Interference avoidance and reporting.
    Interference,
    /// Export licensing and technology transfer control.
    ExportLicensing,
    /// Restricted-party and end-use screening.
    Screening,
    /// Records retention and documentation.
    Recordkeeping,
    /// Physical and operational safety of launch and ground facilities.
    OperationalSafety,
}

impl ControlTopic {
    /// snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Governance => "governance",
            Self::RiskManagement => "risk_management",
            Self::IncidentReporting => "incident_reporting",
            Self::BusinessContinuity => "business_continuity",
            Self::SupplyChain => "supply_chain",
            Self::Cryptography => "cryptography",
            Self::AccessControl => "access_control",
            Self::VulnerabilityManagement => "vulnerability_management",
            Self::Training => "training",
            Self::Registration => "registration",
            Self::Authorization => "authorization",
            Self::Insurance => "insurance",
            Self::DebrisMitigation => "debris_mitigation",
            Self::CollisionAvoidance => "collision_avoidance",
            Self::SpaceSituationalAwareness => "space_situational_awareness",
            Self::Passivation => "passivation",
            Self::EndOfLife => "end_of_life",
            Self::Environmental => "environmental",
            Self::SpectrumFiling => "spectrum_filing",
            Self::Interference => "interference",
            Self::ExportLicensing => "export_licensing",
            Self::Screening => "screening",
            Self::Recordkeeping => "recordkeeping",
            Self::OperationalSafety => "operational_safety",
        }
    }
}

impl fmt::Display for ControlTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

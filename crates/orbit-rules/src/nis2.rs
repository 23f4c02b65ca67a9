//! # NIS2 Engine
//!
//! Entity classification under Directive (EU) 2022/2555 and the Art. 21
//! cybersecurity risk-management measures that follow from it.
//!
//! ## Classification
//!
//! | Condition                                                     | Class        |
//! |---------------------------------------------------------------|--------------|
//! | Annex I sector, large                                         | essential    |
//! | Qualified trust service, TLD registry, DNS service (any size) | essential    |
//! | Designated critical entity (CER Directive)                    | essential    |
//! | Public administration                                         | essential    |
//! | Annex I medium, or Annex II medium/large                      | important    |
//! | Small sole provider of a service in its Member State          | important    |
//! | Anything else                                                 | out of scope |
//!
//! Size uses the Art. 2 size-cap rule: an entity is at least medium once it
//! reaches 50 staff *or* exceeds both €10M turnover and €10M balance sheet.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orbit_core::{BindingLevel, ControlTopic, Deadline, Framework, Severity, ValidationError};

use crate::catalog::Requirement;
use crate::engine::{FrameworkClassification, RegulatoryEngine};
use crate::sizing::{check_amount, EntitySize};

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Sector of activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// Annex I: operators of ground infrastructure for space-based services.
    Space,
    /// Annex I.
    Energy,
    /// Annex I.
    Transport,
    /// Annex I.
    Banking,
    /// Annex I.
    Health,
    /// Annex I.
    DigitalInfrastructure,
    /// Annex I: managed ICT services (B2B).
    IctServiceManagement,
    /// Annex I.
    PublicAdministration,
    /// Annex II.
    Manufacturing,
    /// Annex II: marketplaces, search engines, social networks.
    DigitalProviders,
    /// Annex II.
    Research,
    /// Annex II.
    Postal,
    /// Not listed in either annex.
    Other,
}

/// Annex a sector is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annex {
    /// Sectors of high criticality.
    AnnexI,
    /// Other critical sectors.
    AnnexII,
    /// Not listed.
    None,
}

impl Sector {
    /// Annex the sector belongs to.
    pub fn annex(self) -> Annex {
        match self {
            Self::Space
            | Self::Energy
            | Self::Transport
            | Self::Banking
            | Self::Health
            | Self::DigitalInfrastructure
            | Self::IctServiceManagement
            | Self::PublicAdministration => Annex::AnnexI,
            Self::Manufacturing | Self::DigitalProviders | Self::Research | Self::Postal => {
                Annex::AnnexII
            }
            Self::Other => Annex::None,
        }
    }
}

/// Services that bring an entity into scope regardless of size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeIndependentService {
    /// No size-independent service.
    #[default]
    None,
    /// Qualified trust service provider.
    QualifiedTrustService,
    /// Top-level domain name registry.
    TldRegistry,
    /// DNS service provider.
    DnsService,
}

/// NIS2 entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityClass {
    /// Essential entity (Art. 3(1)).
    Essential,
    /// Important entity (Art. 3(2)).
    Important,
    /// Not covered.
    OutOfScope,
}

impl EntityClass {
    /// Whether the directive applies.
    pub fn in_scope(self) -> bool {
        !matches!(self, Self::OutOfScope)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Essential => write!(f, "essential"),
            Self::Important => write!(f, "important"),
            Self::OutOfScope => write!(f, "out_of_scope"),
        }
    }
}

/// Supervisory regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Supervision {
    /// Proactive audits and inspections (Art. 32).
    ExAnte,
    /// Reactive supervision on evidence of non-compliance (Art. 33).
    ExPost,
}

/// Raw questionnaire answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nis2Questionnaire {
    /// Sector. Required.
    pub sector: Option<Sector>,
    /// Headcount. Required.
    pub employees: Option<u32>,
    /// Annual turnover in EUR. Required.
    pub annual_turnover_eur: Option<f64>,
    /// Balance sheet total in EUR; defaults to turnover.
    pub balance_sheet_eur: Option<f64>,
    /// Size-independent service, if any.
    pub size_independent_service: Option<SizeIndependentService>,
    /// Designated critical entity under the CER Directive.
    pub designated_critical_entity: Option<bool>,
    /// Sole provider of an essential service in its Member State.
    pub sole_provider_in_member_state: Option<bool>,
    /// ISO-2 code of the Member State of main establishment.
    pub member_state: Option<String>,
}

/// Validated profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nis2Profile {
    /// Sector.
    pub sector: Sector,
    /// Headcount.
    pub employees: u32,
    /// Annual turnover in EUR.
    pub annual_turnover_eur: f64,
    /// Balance sheet total in EUR.
    pub balance_sheet_eur: f64,
    /// Size under the NIS2 size-cap rule.
    pub entity_size: EntitySize,
    /// Size-independent service.
    pub size_independent_service: SizeIndependentService,
    /// Designated critical entity.
    pub designated_critical_entity: bool,
    /// Sole provider in its Member State.
    pub sole_provider_in_member_state: bool,
    /// Member State, upper-cased.
    pub member_state: Option<String>,
}

impl Nis2Profile {
    /// Entity class with the rule that produced it.
    pub fn entity_class(&self) -> (EntityClass, &'static str) {
        let annex = self.sector.annex();
        if annex == Annex::None {
            return (EntityClass::OutOfScope, "sector not listed in Annex I or II");
        }
        if self.size_independent_service != SizeIndependentService::None {
            return (
                EntityClass::Essential,
                "provides a service covered regardless of size",
            );
        }
        if self.designated_critical_entity {
            return (EntityClass::Essential, "designated critical entity");
        }
        if self.sector == Sector::PublicAdministration {
            return (EntityClass::Essential, "public administration entity");
        }
        match (annex, self.entity_size) {
            (Annex::AnnexI, EntitySize::Large) => {
                (EntityClass::Essential, "large entity in an Annex I sector")
            }
            (Annex::AnnexI, EntitySize::Medium) => {
                (EntityClass::Important, "medium entity in an Annex I sector")
            }
            (Annex::AnnexII, EntitySize::Medium | EntitySize::Large) => (
                EntityClass::Important,
                "medium or large entity in an Annex II sector",
            ),
            _ if self.sole_provider_in_member_state => (
                EntityClass::Important,
                "sole provider of the service in its Member State",
            ),
            _ => (EntityClass::OutOfScope, "below the size cap"),
        }
    }

    fn in_scope(&self) -> bool {
        self.entity_class().0.in_scope()
    }

    fn space_sector(&self) -> bool {
        self.sector == Sector::Space && self.in_scope()
    }
}

/// Size under the NIS2 size-cap rule.
pub fn nis2_size(employees: u32, turnover_eur: f64, balance_sheet_eur: f64) -> EntitySize {
    if employees >= 250 || (turnover_eur > 50_000_000.0 && balance_sheet_eur > 43_000_000.0) {
        EntitySize::Large
    } else if employees >= 50 || (turnover_eur > 10_000_000.0 && balance_sheet_eur > 10_000_000.0)
    {
        EntitySize::Medium
    } else {
        EntitySize::Small
    }
}

/// Maximum administrative fine for an entity class (Art. 34).
pub fn max_fine_eur(class: EntityClass, turnover_eur: f64) -> Option<f64> {
    match class {
        EntityClass::Essential => Some(f64::max(10_000_000.0, turnover_eur * 0.02)),
        EntityClass::Important => Some(f64::max(7_000_000.0, turnover_eur * 0.014)),
        EntityClass::OutOfScope => None,
    }
}

// ---------------------------------------------------------------------------
// Incident timeline (Art. 23)
// ---------------------------------------------------------------------------

/// Art. 23 reporting windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentTimeline {
    /// Early warning, hours after awareness.
    pub early_warning_hours: i64,
    /// Incident notification, hours after awareness.
    pub notification_hours: i64,
    /// Final report, months after the notification.
    pub final_report_months: u32,
}

/// The Art. 23 windows.
pub const INCIDENT_TIMELINE: IncidentTimeline = IncidentTimeline {
    early_warning_hours: 24,
    notification_hours: 72,
    final_report_months: 1,
};

impl IncidentTimeline {
    /// Concrete deadlines for an incident the entity became aware of at
    /// `aware_at`. `None` when a deadline falls past the representable range.
    pub fn deadlines(&self, aware_at: DateTime<Utc>) -> Option<Vec<Deadline>> {
        let notification =
            Deadline::after_hours("NIS2 incident notification", aware_at, self.notification_hours)?;
        let final_report = Deadline::after_months(
            "NIS2 final report",
            notification.due,
            self.final_report_months,
        )?;
        Some(vec![
            Deadline::after_hours("NIS2 early warning", aware_at, self.early_warning_hours)?,
            notification,
            final_report,
        ])
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classification of an entity under NIS2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nis2Classification {
    /// Entity class.
    pub entity_class: EntityClass,
    /// Rule that produced the class.
    pub reason: String,
    /// Sector.
    pub sector: Sector,
    /// Annex of the sector.
    pub annex: Annex,
    /// Size under the size-cap rule.
    pub entity_size: EntitySize,
    /// Supervisory regime, when in scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervision: Option<Supervision>,
    /// Maximum administrative fine in EUR, when in scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fine_eur: Option<f64>,
    /// Reporting windows, when in scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_timeline: Option<IncidentTimeline>,
    /// Member State of main establishment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_state: Option<String>,
}

impl From<Nis2Classification> for FrameworkClassification {
    fn from(c: Nis2Classification) -> Self {
        FrameworkClassification::Nis2(c)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// NIS2 engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nis2Engine;

impl RegulatoryEngine for Nis2Engine {
    const FRAMEWORK: Framework = Framework::Nis2;
    const CATALOG_VERSION: &'static str = "nis2-2022-2555.1";

    type Questionnaire = Nis2Questionnaire;
    type Profile = Nis2Profile;
    type Classification = Nis2Classification;

    fn validate_profile(q: &Nis2Questionnaire) -> Result<Nis2Profile, ValidationError> {
        let sector = q
            .sector
            .ok_or(ValidationError::MissingField { field: "sector" })?;
        let employees = q
            .employees
            .ok_or(ValidationError::MissingField { field: "employees" })?;
        let turnover = q.annual_turnover_eur.ok_or(ValidationError::MissingField {
            field: "annual turnover",
        })?;
        let turnover = check_amount("annual turnover", turnover)?;
        let balance = check_amount(
            "balance sheet total",
            q.balance_sheet_eur.unwrap_or(turnover),
        )?;

        let member_state = match q.member_state.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(code.to_ascii_uppercase())
            }
            Some(code) => {
                return Err(ValidationError::InvalidValue {
                    field: "member state",
                    value: code.to_string(),
                    expected: "ISO 3166-1 alpha-2 code",
                })
            }
        };

        Ok(Nis2Profile {
            sector,
            employees,
            annual_turnover_eur: turnover,
            balance_sheet_eur: balance,
            entity_size: nis2_size(employees, turnover, balance),
            size_independent_service: q.size_independent_service.unwrap_or_default(),
            designated_critical_entity: q.designated_critical_entity.unwrap_or(false),
            sole_provider_in_member_state: q.sole_provider_in_member_state.unwrap_or(false),
            member_state,
        })
    }

    fn classify(profile: &Nis2Profile) -> Nis2Classification {
        let (entity_class, reason) = profile.entity_class();
        let in_scope = entity_class.in_scope();
        Nis2Classification {
            entity_class,
            reason: reason.to_string(),
            sector: profile.sector,
            annex: profile.sector.annex(),
            entity_size: profile.entity_size,
            supervision: match entity_class {
                EntityClass::Essential => Some(Supervision::ExAnte),
                EntityClass::Important => Some(Supervision::ExPost),
                EntityClass::OutOfScope => None,
            },
            max_fine_eur: max_fine_eur(entity_class, profile.annual_turnover_eur),
            incident_timeline: in_scope.then_some(INCIDENT_TIMELINE),
            member_state: profile.member_state.clone(),
        }
    }

    fn catalog() -> &'static [Requirement<Nis2Profile>] {
        CATALOG
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static CATALOG: &[Requirement<Nis2Profile>] = &[
    Requirement {
        id: "nis2.art20.1",
        article: "Art. 20(1)",
        title: "Management body approval and oversight of cybersecurity measures",
        category: "governance",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Governance,
        cross_refs: &[],
        remediation: "Have the management body formally approve the risk-management measures and record its oversight of their implementation.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art20.2",
        article: "Art. 20(2)",
        title: "Cybersecurity training for management",
        category: "governance",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Training,
        cross_refs: &[],
        remediation: "Schedule regular cybersecurity training for members of the management body and keep attendance records.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2a",
        article: "Art. 21(2)(a)",
        title: "Risk analysis and information system security policies",
        category: "risk_management",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::RiskManagement,
        cross_refs: &["esa.res.01"],
        remediation: "Document an information security policy and a risk analysis methodology, and review both at least annually.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2b",
        article: "Art. 21(2)(b)",
        title: "Incident handling",
        category: "risk_management",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::IncidentReporting,
        cross_refs: &[],
        remediation: "Define incident detection, triage, response and post-incident review procedures with assigned roles.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2c",
        article: "Art. 21(2)(c)",
        title: "Business continuity, backup management and crisis management",
        category: "risk_management",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::BusinessContinuity,
        cross_refs: &["esa.res.05"],
        remediation: "Maintain backups, a disaster recovery plan and a crisis management procedure, and test them periodically.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2d",
        article: "Art. 21(2)(d)",
        title: "Supply chain security",
        category: "risk_management",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SupplyChain,
        cross_refs: &["esa.res.03"],
        remediation: "Assess direct suppliers' security practices and set contractual security requirements.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2e",
        article: "Art. 21(2)(e)",
        title: "Security in acquisition, development and maintenance, including vulnerability handling",
        category: "risk_management",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::VulnerabilityManagement,
        cross_refs: &[],
        remediation: "Adopt secure development practices and a vulnerability handling and disclosure process.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2f",
        article: "Art. 21(2)(f)",
        title: "Assessment of the effectiveness of risk-management measures",
        category: "risk_management",
        severity: Severity::Low,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Governance,
        cross_refs: &[],
        remediation: "Define metrics and perform periodic internal audits of the cybersecurity measures.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2g",
        article: "Art. 21(2)(g)",
        title: "Basic cyber hygiene practices and cybersecurity training",
        category: "risk_management",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Training,
        cross_refs: &[],
        remediation: "Roll out staff awareness training and baseline hygiene (patching, password policy, secure configuration).",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2h",
        article: "Art. 21(2)(h)",
        title: "Cryptography and encryption policies",
        category: "risk_management",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Cryptography,
        cross_refs: &[],
        remediation: "Define a cryptography policy covering algorithms, key lengths and key management.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2i",
        article: "Art. 21(2)(i)",
        title: "Human resources security, access control and asset management",
        category: "risk_management",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::AccessControl,
        cross_refs: &["esa.pdp.01"],
        remediation: "Maintain an asset inventory, role-based access control and joiner-mover-leaver procedures.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art21.2j",
        article: "Art. 21(2)(j)",
        title: "Multi-factor authentication and secured communications",
        category: "risk_management",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::AccessControl,
        cross_refs: &[],
        remediation: "Enforce multi-factor authentication for remote and privileged access and secure voice, video and text communications.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art23",
        article: "Art. 23",
        title: "Reporting of significant incidents",
        category: "reporting",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::IncidentReporting,
        cross_refs: &["esa.res.02"],
        remediation: "Set up reporting to the CSIRT or competent authority: early warning within 24 hours, notification within 72 hours, final report within one month.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art3.4",
        article: "Art. 3(4)",
        title: "Registration with the competent authority",
        category: "reporting",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Registration,
        cross_refs: &[],
        remediation: "Submit entity name, sector, contact details and IP ranges to the national registration list and keep them current.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art24",
        article: "Art. 24",
        title: "Use of certified ICT products and services",
        category: "risk_management",
        severity: Severity::Low,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::SupplyChain,
        cross_refs: &[],
        remediation: "Prefer ICT products certified under European cybersecurity certification schemes where available.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.art29",
        article: "Art. 29",
        title: "Cybersecurity information sharing",
        category: "reporting",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::IncidentReporting,
        cross_refs: &[],
        remediation: "Join a sector information-sharing arrangement (e.g. Space ISAC) and notify the competent authority of participation.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "nis2.space.ground",
        article: "Art. 21(2) (space sector)",
        title: "Ground segment physical and network security",
        category: "space_segment",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::AccessControl,
        cross_refs: &[],
        remediation: "Segment mission control networks, restrict physical access to ground stations and monitor for intrusion.",
        applies: |p| p.space_sector(),
    },
    Requirement {
        id: "nis2.space.ttc",
        article: "Art. 21(2)(h) (space sector)",
        title: "Protection of TT&C links",
        category: "space_segment",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Cryptography,
        cross_refs: &["esa.res.04"],
        remediation: "Apply authenticated encryption to telecommand links and protect keys in a dedicated key management system.",
        applies: |p| p.space_sector(),
    },
    Requirement {
        id: "nis2.space.jamming",
        article: "Art. 21(2)(b) (space sector)",
        title: "Jamming and spoofing detection",
        category: "space_segment",
        severity: Severity::Low,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::Interference,
        cross_refs: &["itu.art15"],
        remediation: "Monitor uplink and downlink signal quality for jamming or spoofing and integrate alerts into incident handling.",
        applies: |p| p.space_sector(),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn q(sector: Sector, employees: u32, turnover: f64) -> Nis2Questionnaire {
        Nis2Questionnaire {
            sector: Some(sector),
            employees: Some(employees),
            annual_turnover_eur: Some(turnover),
            ..Default::default()
        }
    }

    fn class_of(q: &Nis2Questionnaire) -> EntityClass {
        let p = Nis2Engine::validate_profile(q).unwrap();
        Nis2Engine::classify(&p).entity_class
    }

    #[test]
    fn employee_boundaries_in_annex_i() {
        assert_eq!(class_of(&q(Sector::Space, 49, 1e6)), EntityClass::OutOfScope);
        assert_eq!(class_of(&q(Sector::Space, 50, 1e6)), EntityClass::Important);
        assert_eq!(class_of(&q(Sector::Space, 249, 1e6)), EntityClass::Important);
        assert_eq!(class_of(&q(Sector::Space, 250, 1e6)), EntityClass::Essential);
    }

    #[test]
    fn employee_boundaries_in_annex_ii() {
        assert_eq!(class_of(&q(Sector::Manufacturing, 49, 1e6)), EntityClass::OutOfScope);
        assert_eq!(class_of(&q(Sector::Manufacturing, 50, 1e6)), EntityClass::Important);
        assert_eq!(class_of(&q(Sector::Manufacturing, 250, 1e6)), EntityClass::Important);
    }

    #[test]
    fn financial_cap_needs_both_figures() {
        let mut small = q(Sector::Energy, 20, 60_000_000.0);
        small.balance_sheet_eur = Some(5_000_000.0);
        assert_eq!(class_of(&small), EntityClass::OutOfScope);
        // Balance defaults to turnover, so both exceed the large cap.
        assert_eq!(class_of(&q(Sector::Energy, 20, 60_000_000.0)), EntityClass::Essential);
    }

    #[test]
    fn size_independent_overrides() {
        let mut dns = q(Sector::DigitalInfrastructure, 3, 100_000.0);
        dns.size_independent_service = Some(SizeIndependentService::DnsService);
        assert_eq!(class_of(&dns), EntityClass::Essential);

        let mut cer = q(Sector::Transport, 3, 100_000.0);
        cer.designated_critical_entity = Some(true);
        assert_eq!(class_of(&cer), EntityClass::Essential);

        assert_eq!(
            class_of(&q(Sector::PublicAdministration, 3, 0.0)),
            EntityClass::Essential
        );

        let mut sole = q(Sector::Space, 10, 500_000.0);
        sole.sole_provider_in_member_state = Some(true);
        assert_eq!(class_of(&sole), EntityClass::Important);
    }

    #[test]
    fn other_sector_is_out_of_scope_regardless() {
        let mut other = q(Sector::Other, 10_000, 1e9);
        other.designated_critical_entity = Some(true);
        let p = Nis2Engine::validate_profile(&other).unwrap();
        let c = Nis2Engine::classify(&p);
        assert_eq!(c.entity_class, EntityClass::OutOfScope);
        assert!(c.supervision.is_none());
        assert!(c.max_fine_eur.is_none());
        assert!(Nis2Engine::applicable_requirements(&p).is_empty());
    }

    #[test]
    fn fines_use_the_larger_amount() {
        assert_eq!(max_fine_eur(EntityClass::Essential, 100_000_000.0), Some(10_000_000.0));
        assert_eq!(max_fine_eur(EntityClass::Essential, 1_000_000_000.0), Some(20_000_000.0));
        assert_eq!(max_fine_eur(EntityClass::Important, 1_000_000_000.0), Some(14_000_000.0));
        assert_eq!(max_fine_eur(EntityClass::OutOfScope, 1e9), None);
    }

    #[test]
    fn supervision_follows_class() {
        let p = Nis2Engine::validate_profile(&q(Sector::Space, 300, 1e6)).unwrap();
        assert_eq!(Nis2Engine::classify(&p).supervision, Some(Supervision::ExAnte));
        let p = Nis2Engine::validate_profile(&q(Sector::Space, 60, 1e6)).unwrap();
        assert_eq!(Nis2Engine::classify(&p).supervision, Some(Supervision::ExPost));
    }

    #[test]
    fn space_controls_only_for_space_sector() {
        let space = Nis2Engine::validate_profile(&q(Sector::Space, 300, 1e6)).unwrap();
        let energy = Nis2Engine::validate_profile(&q(Sector::Energy, 300, 1e6)).unwrap();
        let has_ttc = |p: &Nis2Profile| {
            Nis2Engine::applicable_requirements(p)
                .iter()
                .any(|r| r.id == "nis2.space.ttc")
        };
        assert!(has_ttc(&space));
        assert!(!has_ttc(&energy));
    }

    #[test]
    fn missing_turnover_rejected() {
        let mut incomplete = q(Sector::Space, 300, 0.0);
        incomplete.annual_turnover_eur = None;
        let err = Nis2Engine::validate_profile(&incomplete).unwrap_err();
        assert_eq!(err.to_string(), "annual turnover is required");
    }

    #[test]
    fn member_state_is_normalized() {
        let mut with_state = q(Sector::Space, 300, 1e6);
        with_state.member_state = Some(" de ".into());
        let p = Nis2Engine::validate_profile(&with_state).unwrap();
        assert_eq!(p.member_state.as_deref(), Some("DE"));

        with_state.member_state = Some("Germany".into());
        assert!(Nis2Engine::validate_profile(&with_state).is_err());
    }

    #[test]
    fn timeline_deadlines() {
        let aware = Utc.with_ymd_and_hms(2026, 1, 29, 10, 0, 0).unwrap();
        let d = INCIDENT_TIMELINE.deadlines(aware).unwrap();
        assert_eq!(d[0].due, Utc.with_ymd_and_hms(2026, 1, 30, 10, 0, 0).unwrap());
        assert_eq!(d[1].due, Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap());
        assert_eq!(d[2].due, Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap());
    }
}

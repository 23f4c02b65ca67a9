//! # EU Space Act Engine
//!
//! Classifies an operator under the EU Space Act and selects the
//! obligations that follow from its role, establishment, size, and mission
//! profile. The Act covers the following areas:
//!
//! - **Authorisation**: prior authorisation by the NCA, plus an EU legal
//!   representative for third-country operators.
//! - **Registration**: entry in the Union Register of Space Objects.
//! - **Safety**: trackability, collision avoidance, disposal, passivation,
//!   and re-entry casualty risk.
//! - **Resilience**: cybersecurity risk management, incident notification,
//!   and supply chain security.
//! - **Environmental**: footprint declaration and brightness mitigation.
//! - **Insurance**: third-party liability cover.
//!
//! Micro and small enterprises and research or educational entities fall
//! under the *light regime*. They keep the safety obligations but skip the
//! heavier resilience and environmental documentation. Defence-only
//! missions are outside the Act altogether.

use std::fmt;

use serde::{Deserialize, Serialize};

use orbit_core::{BindingLevel, ControlTopic, Framework, Severity, ValidationError};

use crate::catalog::Requirement;
use crate::engine::{FrameworkClassification, RegulatoryEngine};
use crate::sizing::{check_amount, EntitySize};

// ---------------------------------------------------------------------------
// Questionnaire vocabulary
// ---------------------------------------------------------------------------

/// Role of the operator under the Act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorType {
    /// Operates one or more spacecraft.
    SpacecraftOperator,
    /// Launches objects into outer space.
    LaunchOperator,
    /// Operates a launch site.
    LaunchSiteOperator,
    /// Provides in-orbit servicing (inspection, refuelling, removal).
    InOrbitServiceProvider,
    /// Provides collision avoidance services to other operators.
    CollisionAvoidanceProvider,
    /// Distributes space-based data as a primary provider.
    PrimaryDataProvider,
}

impl OperatorType {
    /// Roles that operate objects in orbit.
    pub fn operates_spacecraft(self) -> bool {
        matches!(self, Self::SpacecraftOperator | Self::InOrbitServiceProvider)
    }
}

/// Where the operator is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Establishment {
    /// Established in a Member State.
    Eu,
    /// Established outside the Union but offering services in it.
    ThirdCountry,
}

/// Coarse orbital band of the mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitBand {
    /// Low Earth orbit.
    Leo,
    /// Medium Earth orbit.
    Meo,
    /// Geostationary orbit.
    Geo,
    /// Highly elliptical orbit.
    Heo,
    /// Beyond the geostationary ring.
    BeyondGeo,
}

/// Raw questionnaire answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EuSpaceActQuestionnaire {
    /// Operator role. Required.
    pub operator_type: Option<OperatorType>,
    /// Establishment. Required.
    pub establishment: Option<Establishment>,
    /// Declared size; derived from headcount and finances when absent.
    pub entity_size: Option<EntitySize>,
    /// Headcount, used to derive size.
    pub employees: Option<u32>,
    /// Annual turnover in EUR, used to derive size.
    pub annual_turnover_eur: Option<f64>,
    /// Balance sheet total in EUR; defaults to turnover.
    pub balance_sheet_eur: Option<f64>,
    /// Research or educational institution.
    pub research_or_education: Option<bool>,
    /// Mission exclusively for defence or national security.
    pub defence_only: Option<bool>,
    /// Orbital band. Required for roles that operate spacecraft.
    pub orbit: Option<OrbitBand>,
    /// Number of spacecraft in the system.
    pub constellation_size: Option<u32>,
    /// Spacecraft carry propulsion.
    pub has_propulsion: Option<bool>,
}

/// Validated profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EuSpaceActProfile {
    /// Operator role.
    pub operator_type: OperatorType,
    /// Establishment.
    pub establishment: Establishment,
    /// Enterprise size.
    pub entity_size: EntitySize,
    /// Research or educational institution.
    pub research_or_education: bool,
    /// Defence-only mission.
    pub defence_only: bool,
    /// Orbital band, when the role operates spacecraft.
    pub orbit: Option<OrbitBand>,
    /// Number of spacecraft (≥ 1).
    pub constellation_size: u32,
    /// Propulsion on board.
    pub has_propulsion: bool,
}

impl EuSpaceActProfile {
    /// Whether the Act applies at all.
    pub fn in_scope(&self) -> bool {
        !self.defence_only
    }

    /// Applicable regime.
    pub fn regime(&self) -> Regime {
        if self.entity_size.is_small_or_micro() || self.research_or_education {
            Regime::Light
        } else {
            Regime::Standard
        }
    }

    fn is_standard(&self) -> bool {
        self.in_scope() && self.regime() == Regime::Standard
    }

    fn operates_spacecraft(&self) -> bool {
        self.in_scope() && self.operator_type.operates_spacecraft()
    }

    fn is_role(&self, role: OperatorType) -> bool {
        self.in_scope() && self.operator_type == role
    }

    fn in_leo(&self) -> bool {
        self.operates_spacecraft() && self.orbit == Some(OrbitBand::Leo)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Regulatory regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Full obligations.
    Standard,
    /// Simplified obligations for small, micro, and research entities.
    Light,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// Constellation size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstellationTier {
    /// One spacecraft.
    Single,
    /// 2–9 spacecraft.
    Small,
    /// 10–99 spacecraft.
    Medium,
    /// 100–999 spacecraft.
    Large,
    /// 1000 or more spacecraft.
    Mega,
}

impl ConstellationTier {
    /// Tier for a spacecraft count.
    pub fn for_size(count: u32) -> Self {
        match count {
            0 | 1 => Self::Single,
            2..=9 => Self::Small,
            10..=99 => Self::Medium,
            100..=999 => Self::Large,
            _ => Self::Mega,
        }
    }
}

/// Classification of an operator under the Act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuSpaceActClassification {
    /// Whether the Act applies.
    pub in_scope: bool,
    /// Why the Act does not apply, when it does not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion_reason: Option<String>,
    /// Operator role.
    pub operator_type: OperatorType,
    /// Enterprise size.
    pub entity_size: EntitySize,
    /// Applicable regime.
    pub regime: Regime,
    /// Prior authorisation needed.
    pub requires_authorization: bool,
    /// EU legal representative needed.
    pub requires_eu_representative: bool,
    /// Registration in the Union Register needed.
    pub requires_registration: bool,
    /// Constellation tier.
    pub constellation_tier: ConstellationTier,
    /// Catalog categories with at least one applicable requirement.
    pub applicable_modules: Vec<String>,
}

impl From<EuSpaceActClassification> for FrameworkClassification {
    fn from(c: EuSpaceActClassification) -> Self {
        FrameworkClassification::EuSpaceAct(c)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// EU Space Act engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuSpaceActEngine;

impl RegulatoryEngine for EuSpaceActEngine {
    const FRAMEWORK: Framework = Framework::EuSpaceAct;
    const CATALOG_VERSION: &'static str = "eu-space-act-2025.1";

    type Questionnaire = EuSpaceActQuestionnaire;
    type Profile = EuSpaceActProfile;
    type Classification = EuSpaceActClassification;

    fn validate_profile(q: &EuSpaceActQuestionnaire) -> Result<EuSpaceActProfile, ValidationError> {
        let operator_type = q.operator_type.ok_or(ValidationError::MissingField {
            field: "operator type",
        })?;
        let establishment = q.establishment.ok_or(ValidationError::MissingField {
            field: "establishment",
        })?;

        let entity_size = match (q.entity_size, q.employees) {
            (Some(size), _) => size,
            (None, Some(employees)) => {
                let turnover = check_amount("annual turnover", q.annual_turnover_eur.unwrap_or(0.0))?;
                let balance = check_amount(
                    "balance sheet total",
                    q.balance_sheet_eur.unwrap_or(turnover),
                )?;
                EntitySize::from_metrics(employees, turnover, balance)
            }
            (None, None) => EntitySize::Large,
        };

        if operator_type.operates_spacecraft() && q.orbit.is_none() {
            return Err(ValidationError::MissingField { field: "orbit" });
        }

        let constellation_size = q.constellation_size.unwrap_or(1);
        if constellation_size == 0 {
            return Err(ValidationError::OutOfRange {
                field: "constellation size",
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            });
        }

        Ok(EuSpaceActProfile {
            operator_type,
            establishment,
            entity_size,
            research_or_education: q.research_or_education.unwrap_or(false),
            defence_only: q.defence_only.unwrap_or(false),
            orbit: q.orbit,
            constellation_size,
            has_propulsion: q.has_propulsion.unwrap_or(false),
        })
    }

    fn classify(profile: &EuSpaceActProfile) -> EuSpaceActClassification {
        let in_scope = profile.in_scope();
        let mut applicable_modules: Vec<String> = Vec::new();
        for r in Self::applicable_requirements(profile) {
            if !applicable_modules.iter().any(|m| m == r.category) {
                applicable_modules.push(r.category.to_string());
            }
        }

        EuSpaceActClassification {
            in_scope,
            exclusion_reason: (!in_scope).then(|| {
                "space objects used exclusively for defence or national security are excluded"
                    .to_string()
            }),
            operator_type: profile.operator_type,
            entity_size: profile.entity_size,
            regime: profile.regime(),
            requires_authorization: in_scope,
            requires_eu_representative: in_scope
                && profile.establishment == Establishment::ThirdCountry,
            requires_registration: profile.operates_spacecraft(),
            constellation_tier: ConstellationTier::for_size(profile.constellation_size),
            applicable_modules,
        }
    }

    fn catalog() -> &'static [Requirement<EuSpaceActProfile>] {
        CATALOG
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static CATALOG: &[Requirement<EuSpaceActProfile>] = &[
    Requirement {
        id: "esa.auth.01",
        article: "Art. 6",
        title: "Prior authorisation by the national competent authority",
        category: "authorisation",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Authorization,
        cross_refs: &[],
        remediation: "File the authorisation application with the NCA of establishment, including the technical, safety and resilience dossiers.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "esa.auth.02",
        article: "Art. 16",
        title: "Legal representative established in the Union",
        category: "authorisation",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Authorization,
        cross_refs: &[],
        remediation: "Designate in writing a legal representative in a Member State where services are offered and notify the designation to the NCA.",
        applies: |p| p.in_scope() && p.establishment == Establishment::ThirdCountry,
    },
    Requirement {
        id: "esa.reg.01",
        article: "Art. 24",
        title: "Registration in the Union Register of Space Objects",
        category: "registration",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Registration,
        cross_refs: &["copuos.a4"],
        remediation: "Submit launch and orbital parameters for each space object to the Union Register within the prescribed period after launch.",
        applies: |p| p.operates_spacecraft(),
    },
    Requirement {
        id: "esa.safety.01",
        article: "Art. 58",
        title: "Trackability of space objects",
        category: "safety",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpaceSituationalAwareness,
        cross_refs: &["copuos.b2"],
        remediation: "Ensure each spacecraft is trackable by ground sensors (size, reflectors or onboard positioning) and share ephemerides with the EU SST network.",
        applies: |p| p.operates_spacecraft(),
    },
    Requirement {
        id: "esa.safety.02",
        article: "Art. 63",
        title: "Subscription to a collision avoidance service",
        category: "safety",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::CollisionAvoidance,
        cross_refs: &["copuos.b4", "iadc.5.4"],
        remediation: "Contract an authorised collision avoidance service provider and define conjunction screening thresholds and response procedures.",
        applies: |p| p.operates_spacecraft(),
    },
    Requirement {
        id: "esa.safety.03",
        article: "Art. 61",
        title: "Manoeuvring capability in low Earth orbit",
        category: "safety",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::CollisionAvoidance,
        cross_refs: &[],
        remediation: "Equip spacecraft with propulsion or another manoeuvring capability sufficient for collision avoidance and disposal, or justify the exemption.",
        applies: |p| p.in_leo() && (p.constellation_size > 1 || p.has_propulsion),
    },
    Requirement {
        id: "esa.safety.04",
        article: "Art. 72",
        title: "End-of-life disposal plan",
        category: "safety",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::EndOfLife,
        cross_refs: &["iadc.5.3.1", "iadc.5.3.2"],
        remediation: "Document the disposal strategy (re-entry or graveyard orbit), its reliability, and the propellant or decay budget that supports it.",
        applies: |p| p.operates_spacecraft(),
    },
    Requirement {
        id: "esa.safety.05",
        article: "Art. 67",
        title: "Passivation of stored energy",
        category: "safety",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Passivation,
        cross_refs: &["iadc.5.2.1"],
        remediation: "Plan depletion of residual propellant, discharge of batteries and venting of pressurants at end of mission or stage separation.",
        applies: |p| p.operates_spacecraft() || p.is_role(OperatorType::LaunchOperator),
    },
    Requirement {
        id: "esa.safety.06",
        article: "Art. 71",
        title: "Re-entry casualty risk assessment",
        category: "safety",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::EndOfLife,
        cross_refs: &["copuos.b9"],
        remediation: "Compute the on-ground casualty risk of re-entry; if it exceeds 1 in 10,000, plan a controlled re-entry or design for demise.",
        applies: |p| p.in_leo(),
    },
    Requirement {
        id: "esa.safety.07",
        article: "Art. 59",
        title: "Limitation of debris released during normal operations",
        category: "safety",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::DebrisMitigation,
        cross_refs: &["iadc.5.1"],
        remediation: "Design mission-related objects (covers, adapters, tethers) to stay attached or minimise their orbital lifetime.",
        applies: |p| p.operates_spacecraft() || p.is_role(OperatorType::LaunchOperator),
    },
    Requirement {
        id: "esa.safety.08",
        article: "Art. 68",
        title: "Brightness and astronomical impact mitigation",
        category: "safety",
        severity: Severity::Low,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Environmental,
        cross_refs: &[],
        remediation: "Assess the apparent magnitude of the constellation and apply darkening, attitude or orbit-shell measures to limit interference with astronomy.",
        applies: |p| p.operates_spacecraft() && p.constellation_size >= 100,
    },
    Requirement {
        id: "esa.res.01",
        article: "Art. 74",
        title: "Cybersecurity risk management framework",
        category: "resilience",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::RiskManagement,
        cross_refs: &["nis2.art21.2a"],
        remediation: "Adopt a documented risk assessment covering space, ground and link segments and approve it at management level.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "esa.res.02",
        article: "Art. 83",
        title: "Notification of significant incidents to the NCA",
        category: "resilience",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::IncidentReporting,
        cross_refs: &["nis2.art23"],
        remediation: "Establish a procedure to notify the NCA within 24 hours of becoming aware of a significant incident, followed by intermediate and final reports.",
        applies: |p| p.in_scope(),
    },
    Requirement {
        id: "esa.res.03",
        article: "Art. 77",
        title: "Supply chain security",
        category: "resilience",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SupplyChain,
        cross_refs: &["nis2.art21.2d"],
        remediation: "Assess the security practices of critical suppliers and include security requirements in procurement contracts.",
        applies: |p| p.is_standard(),
    },
    Requirement {
        id: "esa.res.04",
        article: "Art. 79",
        title: "Protection of command and telemetry links",
        category: "resilience",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Cryptography,
        cross_refs: &["nis2.space.ttc"],
        remediation: "Authenticate and encrypt telecommand uplinks and protect telemetry integrity using keys managed outside the flight segment.",
        applies: |p| p.operates_spacecraft(),
    },
    Requirement {
        id: "esa.res.05",
        article: "Art. 78",
        title: "Business continuity and crisis management",
        category: "resilience",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::BusinessContinuity,
        cross_refs: &["nis2.art21.2c"],
        remediation: "Maintain a tested continuity plan, including backup mission control and recovery of ground segment services.",
        applies: |p| p.is_standard(),
    },
    Requirement {
        id: "esa.env.01",
        article: "Art. 96",
        title: "Environmental footprint declaration",
        category: "environmental",
        severity: Severity::Low,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Environmental,
        cross_refs: &[],
        remediation: "Compute the life-cycle environmental footprint of the mission using the prescribed methodology and submit the declaration with the authorisation file.",
        applies: |p| p.is_standard(),
    },
    Requirement {
        id: "esa.ins.01",
        article: "Art. 44",
        title: "Third-party liability insurance",
        category: "insurance",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Insurance,
        cross_refs: &[],
        remediation: "Obtain third-party liability cover at the minimum amount set by the NCA for launch and in-orbit phases.",
        applies: |p| {
            p.in_scope()
                && !matches!(
                    p.operator_type,
                    OperatorType::CollisionAvoidanceProvider | OperatorType::PrimaryDataProvider
                )
        },
    },
    Requirement {
        id: "esa.launch.01",
        article: "Art. 50",
        title: "Launch safety analysis",
        category: "safety",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::OperationalSafety,
        cross_refs: &[],
        remediation: "Produce a flight safety analysis covering trajectory, failure modes, and casualty expectation for each launch campaign.",
        applies: |p| p.is_role(OperatorType::LaunchOperator),
    },
    Requirement {
        id: "esa.launch.02",
        article: "Art. 52",
        title: "Launch site safety and environmental protection",
        category: "safety",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::OperationalSafety,
        cross_refs: &[],
        remediation: "Maintain site safety rules, hazard zones and environmental monitoring approved by the NCA.",
        applies: |p| p.is_role(OperatorType::LaunchSiteOperator),
    },
    Requirement {
        id: "esa.isos.01",
        article: "Art. 66",
        title: "Consent of the target object's operator",
        category: "authorisation",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Authorization,
        cross_refs: &[],
        remediation: "Obtain written consent from the operator (or State of registry) of every client object before rendezvous or capture operations.",
        applies: |p| p.is_role(OperatorType::InOrbitServiceProvider),
    },
    Requirement {
        id: "esa.cap.01",
        article: "Art. 64",
        title: "Collision avoidance service quality and data sharing",
        category: "safety",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpaceSituationalAwareness,
        cross_refs: &["copuos.b3"],
        remediation: "Document orbit determination accuracy, conjunction screening methodology and data exchange formats offered to clients.",
        applies: |p| p.is_role(OperatorType::CollisionAvoidanceProvider),
    },
    Requirement {
        id: "esa.pdp.01",
        article: "Art. 86",
        title: "Access security for data distribution",
        category: "resilience",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::AccessControl,
        cross_refs: &["nis2.art21.2i"],
        remediation: "Restrict and log access to data distribution systems and apply multi-factor authentication for privileged users.",
        applies: |p| p.is_role(OperatorType::PrimaryDataProvider),
    },
    Requirement {
        id: "esa.sup.01",
        article: "Art. 34",
        title: "Periodic compliance reporting to the NCA",
        category: "supervision",
        severity: Severity::Low,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Recordkeeping,
        cross_refs: &[],
        remediation: "Submit the periodic compliance report and keep supporting records available for NCA inspection.",
        applies: |p| p.in_scope(),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StatusMap;
    use orbit_core::RequirementStatus;

    fn sco_questionnaire() -> EuSpaceActQuestionnaire {
        EuSpaceActQuestionnaire {
            operator_type: Some(OperatorType::SpacecraftOperator),
            establishment: Some(Establishment::Eu),
            orbit: Some(OrbitBand::Leo),
            employees: Some(400),
            annual_turnover_eur: Some(90_000_000.0),
            constellation_size: Some(12),
            has_propulsion: Some(true),
            ..Default::default()
        }
    }

    fn ids(profile: &EuSpaceActProfile) -> Vec<&'static str> {
        EuSpaceActEngine::applicable_requirements(profile)
            .into_iter()
            .map(|r| r.id)
            .collect()
    }

    #[test]
    fn operator_type_is_required() {
        let err = EuSpaceActEngine::validate_profile(&EuSpaceActQuestionnaire::default()).unwrap_err();
        assert_eq!(err.to_string(), "operator type is required");
    }

    #[test]
    fn orbit_required_for_spacecraft_operators() {
        let mut q = sco_questionnaire();
        q.orbit = None;
        let err = EuSpaceActEngine::validate_profile(&q).unwrap_err();
        assert_eq!(err.to_string(), "orbit is required");
    }

    #[test]
    fn orbit_not_required_for_launch_site_operators() {
        let q = EuSpaceActQuestionnaire {
            operator_type: Some(OperatorType::LaunchSiteOperator),
            establishment: Some(Establishment::Eu),
            ..Default::default()
        };
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        assert_eq!(p.entity_size, EntitySize::Large);
        assert!(ids(&p).contains(&"esa.launch.02"));
        assert!(!ids(&p).contains(&"esa.reg.01"));
    }

    #[test]
    fn zero_constellation_rejected() {
        let mut q = sco_questionnaire();
        q.constellation_size = Some(0);
        assert!(matches!(
            EuSpaceActEngine::validate_profile(&q),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn size_is_derived_from_metrics() {
        let mut q = sco_questionnaire();
        q.employees = Some(30);
        q.annual_turnover_eur = Some(5_000_000.0);
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        assert_eq!(p.entity_size, EntitySize::Small);
        assert_eq!(p.regime(), Regime::Light);
    }

    #[test]
    fn declared_size_wins_over_metrics() {
        let mut q = sco_questionnaire();
        q.entity_size = Some(EntitySize::Medium);
        q.employees = Some(5);
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        assert_eq!(p.entity_size, EntitySize::Medium);
    }

    #[test]
    fn light_regime_drops_heavy_documentation() {
        let mut q = sco_questionnaire();
        q.research_or_education = Some(true);
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        let applicable = ids(&p);
        assert!(!applicable.contains(&"esa.env.01"));
        assert!(!applicable.contains(&"esa.res.03"));
        // Safety obligations survive the light regime.
        assert!(applicable.contains(&"esa.safety.04"));
        assert!(applicable.contains(&"esa.res.01"));
    }

    #[test]
    fn third_country_needs_representative() {
        let mut q = sco_questionnaire();
        q.establishment = Some(Establishment::ThirdCountry);
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        let c = EuSpaceActEngine::classify(&p);
        assert!(c.requires_eu_representative);
        assert!(ids(&p).contains(&"esa.auth.02"));
    }

    #[test]
    fn defence_only_is_out_of_scope() {
        let mut q = sco_questionnaire();
        q.defence_only = Some(true);
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        let c = EuSpaceActEngine::classify(&p);
        assert!(!c.in_scope);
        assert!(c.exclusion_reason.is_some());
        assert!(!c.requires_authorization);
        assert!(c.applicable_modules.is_empty());
        assert!(ids(&p).is_empty());
    }

    #[test]
    fn constellation_tiers() {
        assert_eq!(ConstellationTier::for_size(1), ConstellationTier::Single);
        assert_eq!(ConstellationTier::for_size(9), ConstellationTier::Small);
        assert_eq!(ConstellationTier::for_size(10), ConstellationTier::Medium);
        assert_eq!(ConstellationTier::for_size(100), ConstellationTier::Large);
        assert_eq!(ConstellationTier::for_size(1000), ConstellationTier::Mega);
    }

    #[test]
    fn brightness_applies_to_large_constellations_only() {
        let mut q = sco_questionnaire();
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        assert!(!ids(&p).contains(&"esa.safety.08"));
        q.constellation_size = Some(150);
        let p = EuSpaceActEngine::validate_profile(&q).unwrap();
        assert!(ids(&p).contains(&"esa.safety.08"));
    }

    #[test]
    fn all_compliant_scores_100_and_no_gaps() {
        let p = EuSpaceActEngine::validate_profile(&sco_questionnaire()).unwrap();
        let statuses: StatusMap = ids(&p)
            .into_iter()
            .map(|id| (id.to_string(), RequirementStatus::Compliant))
            .collect();
        let score = EuSpaceActEngine::calculate_compliance_score(&p, &statuses);
        assert_eq!(score.score, 100);
        assert!(EuSpaceActEngine::generate_gap_analysis(&p, &statuses).is_empty());
    }

    #[test]
    fn modules_follow_applicable_categories() {
        let p = EuSpaceActEngine::validate_profile(&sco_questionnaire()).unwrap();
        let c = EuSpaceActEngine::classify(&p);
        assert_eq!(c.applicable_modules[0], "authorisation");
        assert!(c.applicable_modules.contains(&"resilience".to_string()));
        assert!(c.applicable_modules.contains(&"environmental".to_string()));
    }
}

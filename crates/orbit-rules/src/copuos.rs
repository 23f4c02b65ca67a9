//! # COPUOS / IADC Debris Engine
//!
//! Debris-mitigation assessment against the IADC Space Debris Mitigation
//! Guidelines and the COPUOS Long-Term Sustainability (LTS) guidelines.
//!
//! ## Orbital lifetime
//!
//! Natural lifetime is interpolated from a reference table keyed on perigee
//! altitude for an area-to-mass ratio of 0.01 m²/kg at moderate solar
//! activity, then scaled inversely with the actual area-to-mass ratio when
//! mass and cross-section are known.
//!
//! Spacecraft without propulsion decay during the mission, so the
//! post-mission lifetime is the natural lifetime less the mission duration.
//! Station-kept spacecraft start decaying only at end of mission.
//! Active disposal (controlled re-entry or deorbit) ends the orbital life
//! at end of mission.
//!
//! The 25-year rule (IADC 5.3.2) and the 5-year rule (FCC 2022, ESA Zero
//! Debris) are checked only inside the LEO protected region
//! (perigee below 2,000 km).

use std::fmt;

use serde::{Deserialize, Serialize};

use orbit_core::{BindingLevel, ControlTopic, Framework, RiskLevel, Severity, ValidationError};

use crate::catalog::Requirement;
use crate::engine::{FrameworkClassification, RegulatoryEngine};

/// Upper boundary of the LEO protected region, km.
pub const LEO_PROTECTED_ALTITUDE_KM: f64 = 2_000.0;

/// IADC post-mission lifetime limit, years.
pub const TWENTY_FIVE_YEAR_RULE: f64 = 25.0;

/// FCC / Zero Debris post-mission lifetime limit, years.
pub const FIVE_YEAR_RULE: f64 = 5.0;

/// Maximum acceptable on-ground casualty risk for uncontrolled re-entry.
pub const CASUALTY_RISK_THRESHOLD: f64 = 1e-4;

/// Area-to-mass ratio the lifetime table is calibrated for, m²/kg.
pub const REFERENCE_AREA_TO_MASS: f64 = 0.01;

/// Perigee altitude (km) to natural orbital lifetime (years).
const LIFETIME_TABLE: &[(f64, f64)] = &[
    (200.0, 0.02),
    (300.0, 0.3),
    (400.0, 1.0),
    (500.0, 5.0),
    (550.0, 10.0),
    (600.0, 25.0),
    (650.0, 40.0),
    (700.0, 70.0),
    (800.0, 150.0),
    (900.0, 400.0),
    (1_000.0, 1_000.0),
    (1_200.0, 2_000.0),
    (1_500.0, 5_000.0),
    (2_000.0, 10_000.0),
];

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Orbit regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitRegime {
    /// Low Earth orbit.
    Leo,
    /// Medium Earth orbit.
    Meo,
    /// Geostationary orbit.
    Geo,
    /// Highly elliptical orbit.
    Heo,
    /// Cislunar space.
    Cislunar,
    /// Escape trajectory.
    Interplanetary,
}

impl OrbitRegime {
    /// Earth-bound regimes.
    pub fn is_earth_orbit(self) -> bool {
        matches!(self, Self::Leo | Self::Meo | Self::Geo | Self::Heo)
    }

    fn needs_perigee(self) -> bool {
        matches!(self, Self::Leo | Self::Heo)
    }
}

impl fmt::Display for OrbitRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Leo => "leo",
            Self::Meo => "meo",
            Self::Geo => "geo",
            Self::Heo => "heo",
            Self::Cislunar => "cislunar",
            Self::Interplanetary => "interplanetary",
        };
        f.write_str(s)
    }
}

/// Planned end-of-life disposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalStrategy {
    /// Targeted re-entry over an unpopulated area.
    ControlledReentry,
    /// Propulsive lowering to a short-lived orbit.
    ActiveDeorbit,
    /// Re-orbit above the GEO protected region.
    GraveyardOrbit,
    /// Left to decay.
    #[default]
    NaturalDecay,
    /// No disposal planned.
    None,
}

impl DisposalStrategy {
    /// Disposal ends the orbital life at end of mission.
    pub fn is_active_removal(self) -> bool {
        matches!(self, Self::ControlledReentry | Self::ActiveDeorbit)
    }
}

/// Raw questionnaire answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopuosQuestionnaire {
    /// Orbit regime. Required.
    pub orbit_regime: Option<OrbitRegime>,
    /// Perigee altitude, km. Required for LEO and HEO.
    pub perigee_km: Option<f64>,
    /// Apogee altitude, km. Required for LEO and HEO.
    pub apogee_km: Option<f64>,
    /// Planned mission duration, years. Required.
    pub mission_lifetime_years: Option<f64>,
    /// Spacecraft mass, kg.
    pub mass_kg: Option<f64>,
    /// Average cross-sectional area, m².
    pub cross_section_m2: Option<f64>,
    /// Solar radiation pressure coefficient (default 1.5).
    pub reflectivity_coefficient: Option<f64>,
    /// Propulsion on board.
    pub has_propulsion: Option<bool>,
    /// Spacecraft in the system (default 1).
    pub constellation_size: Option<u32>,
    /// Disposal strategy (default natural decay).
    pub disposal: Option<DisposalStrategy>,
    /// Computed on-ground casualty risk, 0–1.
    pub casualty_risk: Option<f64>,
}

/// Validated profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopuosProfile {
    /// Orbit regime.
    pub orbit_regime: OrbitRegime,
    /// Perigee altitude, km.
    pub perigee_km: Option<f64>,
    /// Apogee altitude, km.
    pub apogee_km: Option<f64>,
    /// Mission duration, years.
    pub mission_lifetime_years: f64,
    /// Mass, kg.
    pub mass_kg: Option<f64>,
    /// Cross-section, m².
    pub cross_section_m2: Option<f64>,
    /// Reflectivity coefficient.
    pub reflectivity_coefficient: f64,
    /// Propulsion on board.
    pub has_propulsion: bool,
    /// Spacecraft in the system.
    pub constellation_size: u32,
    /// Disposal strategy.
    pub disposal: DisposalStrategy,
    /// Casualty risk.
    pub casualty_risk: Option<f64>,
}

impl CopuosProfile {
    fn earth_orbit(&self) -> bool {
        self.orbit_regime.is_earth_orbit()
    }

    /// Perigee inside the LEO protected region.
    pub fn in_leo_protected_region(&self) -> bool {
        self.earth_orbit()
            && matches!(self.perigee_km, Some(p) if p < LEO_PROTECTED_ALTITUDE_KM)
    }

    /// Area-to-mass ratio, m²/kg, when both inputs are known.
    pub fn area_to_mass(&self) -> Option<f64> {
        match (self.cross_section_m2, self.mass_kg) {
            (Some(a), Some(m)) if m > 0.0 => Some(a / m),
            _ => None,
        }
    }

    fn may_reenter(&self) -> bool {
        self.in_leo_protected_region() && self.disposal != DisposalStrategy::GraveyardOrbit
    }
}

// ---------------------------------------------------------------------------
// Computations
// ---------------------------------------------------------------------------

/// Natural orbital lifetime in years for a perigee altitude, at the
/// reference area-to-mass ratio.
///
/// Piecewise-linear over the reference table; clamped at both ends.
pub fn natural_lifetime_years(perigee_km: f64) -> f64 {
    let (first_alt, first_life) = LIFETIME_TABLE[0];
    if perigee_km <= first_alt {
        return first_life;
    }
    for pair in LIFETIME_TABLE.windows(2) {
        let (lo_alt, lo_life) = pair[0];
        let (hi_alt, hi_life) = pair[1];
        if perigee_km <= hi_alt {
            let t = (perigee_km - lo_alt) / (hi_alt - lo_alt);
            return lo_life + t * (hi_life - lo_life);
        }
    }
    LIFETIME_TABLE[LIFETIME_TABLE.len() - 1].1
}

/// Minimum raise above the geostationary altitude for a graveyard orbit, km.
///
/// IADC formula: `235 + 1000 · CR · A/m`.
pub fn graveyard_min_raise_km(reflectivity: f64, area_to_mass: f64) -> f64 {
    235.0 + 1_000.0 * reflectivity * area_to_mass
}

/// Outcome of the debris assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisAssessment {
    /// Orbit regime.
    pub orbit_regime: OrbitRegime,
    /// Perigee below 2,000 km.
    pub in_leo_protected_region: bool,
    /// Natural lifetime from the perigee, years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_lifetime_years: Option<f64>,
    /// Orbital lifetime remaining after end of mission, years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_mission_lifetime_years: Option<f64>,
    /// IADC 25-year rule, inside the LEO protected region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliant_25_year_rule: Option<bool>,
    /// 5-year rule, inside the LEO protected region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliant_5_year_rule: Option<bool>,
    /// Minimum graveyard raise for GEO missions, km.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graveyard_min_raise_km: Option<f64>,
    /// Casualty risk at or below 1e-4 (or controlled re-entry).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casualty_risk_compliant: Option<bool>,
    /// Overall debris risk.
    pub risk_level: RiskLevel,
    /// Human-readable findings, most severe first.
    pub findings: Vec<String>,
}

impl From<DebrisAssessment> for FrameworkClassification {
    fn from(c: DebrisAssessment) -> Self {
        FrameworkClassification::Copuos(c)
    }
}

fn assess_debris(p: &CopuosProfile) -> DebrisAssessment {
    let in_leo = p.in_leo_protected_region();
    let scale = p
        .area_to_mass()
        .filter(|am| *am > 0.0)
        .map_or(1.0, |am| REFERENCE_AREA_TO_MASS / am);

    let natural = p
        .perigee_km
        .filter(|_| p.earth_orbit())
        .map(|perigee| natural_lifetime_years(perigee) * scale);

    let post_mission = natural.map(|life| {
        if p.disposal.is_active_removal() {
            0.0
        } else if p.has_propulsion {
            life
        } else {
            (life - p.mission_lifetime_years).max(0.0)
        }
    });

    let (rule_25, rule_5) = match post_mission {
        Some(remaining) if in_leo => (
            Some(remaining <= TWENTY_FIVE_YEAR_RULE),
            Some(remaining <= FIVE_YEAR_RULE),
        ),
        _ => (None, None),
    };

    let graveyard = (p.orbit_regime == OrbitRegime::Geo).then(|| {
        graveyard_min_raise_km(
            p.reflectivity_coefficient,
            p.area_to_mass().unwrap_or(REFERENCE_AREA_TO_MASS),
        )
    });

    let casualty = if !p.may_reenter() {
        None
    } else if p.disposal == DisposalStrategy::ControlledReentry {
        Some(true)
    } else {
        p.casualty_risk.map(|r| r <= CASUALTY_RISK_THRESHOLD)
    };

    let mut critical: Vec<String> = Vec::new();
    let mut high: Vec<String> = Vec::new();
    let mut medium: Vec<String> = Vec::new();

    if rule_25 == Some(false) {
        critical.push(format!(
            "post-mission lifetime of {:.1} years exceeds the 25-year limit",
            post_mission.unwrap_or_default()
        ));
    } else if rule_5 == Some(false) {
        high.push(format!(
            "post-mission lifetime of {:.1} years exceeds the 5-year limit",
            post_mission.unwrap_or_default()
        ));
    }
    if casualty == Some(false) {
        critical.push("re-entry casualty risk exceeds 1 in 10,000".to_string());
    }
    if p.orbit_regime == OrbitRegime::Geo && p.disposal != DisposalStrategy::GraveyardOrbit {
        if p.disposal == DisposalStrategy::None {
            critical.push("no disposal planned for a GEO spacecraft".to_string());
        } else {
            high.push("GEO disposal should re-orbit above the protected region".to_string());
        }
    } else if p.disposal == DisposalStrategy::None && p.earth_orbit() {
        high.push("no end-of-life disposal planned".to_string());
    }
    if p.earth_orbit() && p.constellation_size >= 100 && !p.has_propulsion {
        high.push("large constellation without manoeuvring capability".to_string());
    } else if p.constellation_size >= 10 {
        medium.push("constellation increases collision exposure".to_string());
    }
    if p.may_reenter() && casualty.is_none() {
        medium.push("re-entry casualty risk has not been computed".to_string());
    }

    let risk_level = if !critical.is_empty() {
        RiskLevel::Critical
    } else if !high.is_empty() {
        RiskLevel::High
    } else if !medium.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let mut findings = critical;
    findings.extend(high);
    findings.extend(medium);

    DebrisAssessment {
        orbit_regime: p.orbit_regime,
        in_leo_protected_region: in_leo,
        natural_lifetime_years: natural,
        post_mission_lifetime_years: post_mission,
        compliant_25_year_rule: rule_25,
        compliant_5_year_rule: rule_5,
        graveyard_min_raise_km: graveyard,
        casualty_risk_compliant: casualty,
        risk_level,
        findings,
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// COPUOS / IADC engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopuosEngine;

fn positive(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(ValidationError::OutOfRange {
            field,
            value: v,
            min: 0.0,
            max: f64::MAX,
        }),
        other => Ok(other),
    }
}

impl RegulatoryEngine for CopuosEngine {
    const FRAMEWORK: Framework = Framework::Copuos;
    const CATALOG_VERSION: &'static str = "iadc-2025.lts-2019.1";

    type Questionnaire = CopuosQuestionnaire;
    type Profile = CopuosProfile;
    type Classification = DebrisAssessment;

    fn validate_profile(q: &CopuosQuestionnaire) -> Result<CopuosProfile, ValidationError> {
        let orbit_regime = q.orbit_regime.ok_or(ValidationError::MissingField {
            field: "orbit regime",
        })?;

        let perigee_km = positive("perigee altitude", q.perigee_km)?;
        let apogee_km = positive("apogee altitude", q.apogee_km)?;
        if orbit_regime.needs_perigee() {
            if perigee_km.is_none() {
                return Err(ValidationError::MissingField {
                    field: "perigee altitude",
                });
            }
            if apogee_km.is_none() {
                return Err(ValidationError::MissingField {
                    field: "apogee altitude",
                });
            }
        }
        if let (Some(perigee), Some(apogee)) = (perigee_km, apogee_km) {
            if apogee < perigee {
                return Err(ValidationError::InconsistentFields {
                    message: format!("apogee ({apogee} km) is below perigee ({perigee} km)"),
                });
            }
        }

        let lifetime = q
            .mission_lifetime_years
            .ok_or(ValidationError::MissingField {
                field: "mission lifetime",
            })?;
        if !lifetime.is_finite() || lifetime <= 0.0 || lifetime > 50.0 {
            return Err(ValidationError::OutOfRange {
                field: "mission lifetime",
                value: lifetime,
                min: 0.0,
                max: 50.0,
            });
        }

        let reflectivity = q.reflectivity_coefficient.unwrap_or(1.5);
        if !(1.0..=2.0).contains(&reflectivity) {
            return Err(ValidationError::OutOfRange {
                field: "reflectivity coefficient",
                value: reflectivity,
                min: 1.0,
                max: 2.0,
            });
        }

        if let Some(risk) = q.casualty_risk {
            if !(0.0..=1.0).contains(&risk) {
                return Err(ValidationError::OutOfRange {
                    field: "casualty risk",
                    value: risk,
                    min: 0.0,
                    max: 1.0,
                });
            }
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

        Ok(CopuosProfile {
            orbit_regime,
            perigee_km,
            apogee_km,
            mission_lifetime_years: lifetime,
            mass_kg: positive("mass", q.mass_kg)?,
            cross_section_m2: positive("cross-section", q.cross_section_m2)?,
            reflectivity_coefficient: reflectivity,
            has_propulsion: q.has_propulsion.unwrap_or(false),
            constellation_size,
            disposal: q.disposal.unwrap_or_default(),
            casualty_risk: q.casualty_risk,
        })
    }

    fn classify(profile: &CopuosProfile) -> DebrisAssessment {
        assess_debris(profile)
    }

    fn catalog() -> &'static [Requirement<CopuosProfile>] {
        CATALOG
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static CATALOG: &[Requirement<CopuosProfile>] = &[
    Requirement {
        id: "iadc.5.1",
        article: "IADC 5.1",
        title: "Limit debris released during normal operations",
        category: "iadc",
        severity: Severity::High,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::DebrisMitigation,
        cross_refs: &["esa.safety.07"],
        remediation: "Retain covers, adapters and other mission-related objects, or place them in orbits with a short lifetime.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "iadc.5.2.1",
        article: "IADC 5.2.1",
        title: "Minimise post-mission break-ups from stored energy",
        category: "iadc",
        severity: Severity::High,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::Passivation,
        cross_refs: &["esa.safety.05"],
        remediation: "Passivate at end of mission: deplete propellant, discharge batteries, vent pressure vessels and disable momentum wheels.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "iadc.5.2.2",
        article: "IADC 5.2.2",
        title: "Minimise break-ups during operational phases",
        category: "iadc",
        severity: Severity::High,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::OperationalSafety,
        cross_refs: &[],
        remediation: "Perform failure mode analysis for break-up risk and monitor for anomalies that could lead to a break-up.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "iadc.5.2.3",
        article: "IADC 5.2.3",
        title: "Avoid intentional destruction and harmful activities",
        category: "iadc",
        severity: Severity::Critical,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::DebrisMitigation,
        cross_refs: &[],
        remediation: "Commit in the mission plan to no intentional destruction generating long-lived debris.",
        applies: |_| true,
    },
    Requirement {
        id: "iadc.5.3.1",
        article: "IADC 5.3.1",
        title: "Disposal above the GEO protected region",
        category: "iadc",
        severity: Severity::Critical,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::EndOfLife,
        cross_refs: &["esa.safety.04"],
        remediation: "Reserve propellant to re-orbit at least the computed minimum raise above the geostationary altitude.",
        applies: |p| p.orbit_regime == OrbitRegime::Geo,
    },
    Requirement {
        id: "iadc.5.3.2",
        article: "IADC 5.3.2",
        title: "LEO disposal within 25 years",
        category: "iadc",
        severity: Severity::Critical,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::EndOfLife,
        cross_refs: &["esa.safety.04"],
        remediation: "Lower the orbit or deorbit so that the post-mission lifetime does not exceed 25 years (5 years for new missions under FCC and Zero Debris rules).",
        applies: |p| p.in_leo_protected_region(),
    },
    Requirement {
        id: "iadc.5.4",
        article: "IADC 5.4",
        title: "Prevention of on-orbit collisions",
        category: "iadc",
        severity: Severity::High,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::CollisionAvoidance,
        cross_refs: &["esa.safety.02"],
        remediation: "Estimate collision probability over the mission and plan avoidance manoeuvres and operational coordination.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "copuos.b1",
        article: "LTS B.1",
        title: "Provide contact information and share orbital information",
        category: "lts",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::SpaceSituationalAwareness,
        cross_refs: &[],
        remediation: "Publish an operations contact point and share orbital information with other operators.",
        applies: |_| true,
    },
    Requirement {
        id: "copuos.b2",
        article: "LTS B.2",
        title: "Improve accuracy of orbital data",
        category: "lts",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::SpaceSituationalAwareness,
        cross_refs: &["esa.safety.01"],
        remediation: "Use onboard GNSS or laser retroreflectors to improve orbit determination and share covariance with SSA providers.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "copuos.b3",
        article: "LTS B.3",
        title: "Share space debris monitoring information",
        category: "lts",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::SpaceSituationalAwareness,
        cross_refs: &["esa.cap.01"],
        remediation: "Contribute debris observations and fragmentation reports to shared databases.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "copuos.b4",
        article: "LTS B.4",
        title: "Conjunction assessment during all orbital phases",
        category: "lts",
        severity: Severity::High,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::CollisionAvoidance,
        cross_refs: &["esa.safety.02"],
        remediation: "Perform conjunction assessment before launch, during orbit raising, in operations and during disposal.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "copuos.b8",
        article: "LTS B.8",
        title: "Design and operation regardless of physical size",
        category: "lts",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::SpaceSituationalAwareness,
        cross_refs: &[],
        remediation: "Ensure small spacecraft remain trackable and identifiable and follow the same mitigation practices as larger ones.",
        applies: |p| p.earth_orbit(),
    },
    Requirement {
        id: "copuos.b9",
        article: "LTS B.9",
        title: "Manage risks of uncontrolled re-entry",
        category: "lts",
        severity: Severity::High,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::EndOfLife,
        cross_refs: &["esa.safety.06"],
        remediation: "Compute the casualty risk and design for demise or controlled re-entry when it exceeds 1 in 10,000.",
        applies: |p| p.may_reenter(),
    },
    Requirement {
        id: "copuos.b10",
        article: "LTS B.10",
        title: "Precautions for laser beams passing through outer space",
        category: "lts",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::OperationalSafety,
        cross_refs: &[],
        remediation: "Coordinate laser ranging or communications with affected operators to avoid damage to spacecraft.",
        applies: |_| true,
    },
    Requirement {
        id: "copuos.a4",
        article: "LTS A.4 / Registration Convention",
        title: "Registration of space objects with the United Nations",
        category: "lts",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Registration,
        cross_refs: &["esa.reg.01"],
        remediation: "Provide the launching State with the data needed to register the object with the UN Secretary-General.",
        applies: |_| true,
    },
    Requirement {
        id: "copuos.d2",
        article: "LTS D.2",
        title: "Long-term management of the debris population",
        category: "lts",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::DebrisMitigation,
        cross_refs: &[],
        remediation: "Evaluate active debris removal readiness (e.g. docking interfaces) for large constellations.",
        applies: |p| p.earth_orbit() && p.constellation_size >= 100,
    },
];

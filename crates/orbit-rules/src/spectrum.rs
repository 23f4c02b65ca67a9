//! # Spectrum / ITU Engine
//!
//! Determines the ITU Radio Regulations filing procedure for a satellite
//! network, its regulatory bring-into-use (BIU) limit, and the Resolution 35
//! deployment milestones for large non-geostationary systems.
//!
//! | Condition                                        | Procedure           |
//! |--------------------------------------------------|---------------------|
//! | Amateur service only                             | IARU coordination   |
//! | GSO                                              | coordination        |
//! | NGSO, FSS/MSS/BSS in Ku, Ka, or Q/V              | coordination        |
//! | Otherwise                                        | advance publication |
//!
//! The regulatory BIU limit is seven years after the API date (RR 11.44).
//! Resolution 35 milestones count from that limit: 10% of the system at
//! +2 years, 50% at +5 years, and the full system at +7 years.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use orbit_core::{BindingLevel, ControlTopic, Framework, Severity, ValidationError};

use crate::catalog::Requirement;
use crate::engine::{FrameworkClassification, RegulatoryEngine};

/// Years from API to the regulatory bring-into-use limit.
pub const BIU_LIMIT_YEARS: u32 = 7;

/// Minimum recommended lead time between API and BIU, years.
pub const API_MIN_LEAD_YEARS: u32 = 2;

/// Resolution 35 milestones as (years after BIU limit, percent deployed).
pub const RES35_MILESTONES: &[(u32, u32)] = &[(2, 10), (5, 50), (7, 100)];

/// Orbit type of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitType {
    /// Geostationary.
    Gso,
    /// Non-geostationary.
    Ngso,
}

/// Radiocommunication service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioService {
    /// Fixed-satellite service.
    Fss,
    /// Mobile-satellite service.
    Mss,
    /// Broadcasting-satellite service.
    Bss,
    /// Earth exploration-satellite service.
    Eess,
    /// Space research service.
    SpaceResearch,
    /// Space operation service (TT&C).
    SpaceOperation,
    /// Amateur-satellite service.
    Amateur,
}

impl RadioService {
    fn is_commercial_broadband(self) -> bool {
        matches!(self, Self::Fss | Self::Mss | Self::Bss)
    }
}

/// Frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// 30–300 MHz.
    Vhf,
    /// 300 MHz–1 GHz.
    Uhf,
    /// 1–2 GHz.
    L,
    /// 2–4 GHz.
    S,
    /// 4–8 GHz.
    C,
    /// 8–12 GHz.
    X,
    /// 12–18 GHz.
    Ku,
    /// 26.5–40 GHz.
    Ka,
    /// 40–75 GHz.
    QV,
}

impl Band {
    fn is_high_throughput(self) -> bool {
        matches!(self, Self::Ku | Self::Ka | Self::QV)
    }

    fn shares_with_terrestrial(self) -> bool {
        matches!(self, Self::L | Self::S | Self::C | Self::X | Self::Ku | Self::Ka)
    }
}

/// ITU filing procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingProcedure {
    /// Amateur frequency coordination through IARU, then API.
    IaruCoordination,
    /// Coordination under RR Art. 9 Section II.
    Coordination,
    /// Advance publication under RR Art. 9 Section I.
    AdvancePublication,
}

/// Raw questionnaire answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumQuestionnaire {
    /// Orbit type. Required.
    pub orbit_type: Option<OrbitType>,
    /// Services provided. Required, non-empty.
    pub services: Vec<RadioService>,
    /// Bands used. Required, non-empty.
    pub bands: Vec<Band>,
    /// Satellites in the system (default 1).
    pub satellite_count: Option<u32>,
    /// Date the API was or will be received by the Bureau.
    pub api_date: Option<NaiveDate>,
    /// Planned bring-into-use date.
    pub planned_bring_into_use: Option<NaiveDate>,
    /// ISO-2 code of the notifying administration.
    pub notifying_administration: Option<String>,
}

/// Validated profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumProfile {
    /// Orbit type.
    pub orbit_type: OrbitType,
    /// Services, deduplicated.
    pub services: Vec<RadioService>,
    /// Bands, deduplicated.
    pub bands: Vec<Band>,
    /// Satellites in the system.
    pub satellite_count: u32,
    /// API date.
    pub api_date: Option<NaiveDate>,
    /// Planned BIU date.
    pub planned_bring_into_use: Option<NaiveDate>,
    /// Notifying administration, upper-cased.
    pub notifying_administration: Option<String>,
}

impl SpectrumProfile {
    fn has_service(&self, pred: impl Fn(RadioService) -> bool) -> bool {
        self.services.iter().any(|s| pred(*s))
    }

    fn has_band(&self, pred: impl Fn(Band) -> bool) -> bool {
        self.bands.iter().any(|b| pred(*b))
    }

    fn amateur_only(&self) -> bool {
        self.services.iter().all(|s| *s == RadioService::Amateur)
    }

    /// Filing procedure.
    pub fn filing_procedure(&self) -> FilingProcedure {
        if self.amateur_only() {
            FilingProcedure::IaruCoordination
        } else if self.orbit_type == OrbitType::Gso
            || (self.has_band(Band::is_high_throughput)
                && self.has_service(RadioService::is_commercial_broadband))
        {
            FilingProcedure::Coordination
        } else {
            FilingProcedure::AdvancePublication
        }
    }

    /// Resolution 35 milestones apply.
    pub fn milestones_apply(&self) -> bool {
        self.orbit_type == OrbitType::Ngso
            && self.has_service(RadioService::is_commercial_broadband)
            && self.has_band(Band::is_high_throughput)
    }

    /// Art. 22 EPFD limits apply.
    pub fn epfd_applies(&self) -> bool {
        self.orbit_type == OrbitType::Ngso
            && self.has_service(|s| s == RadioService::Fss)
            && self.has_band(|b| matches!(b, Band::Ku | Band::Ka))
    }

    /// Regulatory bring-into-use limit.
    pub fn biu_limit(&self) -> Option<NaiveDate> {
        self.api_date.map(|api| add_years(api, BIU_LIMIT_YEARS))
    }
}

fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_add_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MAX)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// A Resolution 35 deployment milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Share of the system that must be deployed, percent.
    pub percent: u32,
    /// Satellites that must be deployed.
    pub satellites_required: u32,
    /// Years after the BIU limit.
    pub years_after_biu: u32,
    /// Due date, when the API date is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
}

/// Spectrum filing classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectrumClassification {
    /// Orbit type.
    pub orbit_type: OrbitType,
    /// Filing procedure.
    pub filing_procedure: FilingProcedure,
    /// Regulatory BIU limit (API + 7 years).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biu_limit: Option<NaiveDate>,
    /// Planned BIU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_bring_into_use: Option<NaiveDate>,
    /// Resolution 35 milestones, empty when not applicable.
    pub milestones: Vec<Milestone>,
    /// Art. 22 EPFD limits apply.
    pub epfd_limits_apply: bool,
    /// Timeline warnings.
    pub warnings: Vec<String>,
    /// Notifying administration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifying_administration: Option<String>,
}

impl From<SpectrumClassification> for FrameworkClassification {
    fn from(c: SpectrumClassification) -> Self {
        FrameworkClassification::Spectrum(c)
    }
}

/// Resolution 35 milestones for a system of `satellites`.
pub fn res35_milestones(satellites: u32, biu_limit: Option<NaiveDate>) -> Vec<Milestone> {
    RES35_MILESTONES
        .iter()
        .map(|&(years, percent)| Milestone {
            percent,
            // Ceiling: a partial satellite still has to be launched.
            satellites_required: ((u64::from(satellites) * u64::from(percent) + 99) / 100) as u32,
            years_after_biu: years,
            due: biu_limit.map(|biu| add_years(biu, years)),
        })
        .collect()
}

fn timeline_warnings(p: &SpectrumProfile) -> Vec<String> {
    let mut warnings = Vec::new();
    match (p.api_date, p.planned_bring_into_use) {
        (Some(api), Some(biu)) => {
            let limit = add_years(api, BIU_LIMIT_YEARS);
            if biu > limit {
                warnings.push(format!(
                    "planned bring-into-use {biu} is after the regulatory limit {limit}"
                ));
            }
            if biu < add_years(api, API_MIN_LEAD_YEARS) {
                warnings.push(format!(
                    "planned bring-into-use {biu} is less than {API_MIN_LEAD_YEARS} years after the API"
                ));
            }
        }
        (None, Some(_)) => {
            warnings.push("no API date given; the regulatory limit cannot be checked".to_string())
        }
        _ => {}
    }
    warnings
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Spectrum / ITU engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumEngine;

fn dedup<T: PartialEq + Copy>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}

impl RegulatoryEngine for SpectrumEngine {
    const FRAMEWORK: Framework = Framework::Spectrum;
    const CATALOG_VERSION: &'static str = "itu-rr-2024.1";

    type Questionnaire = SpectrumQuestionnaire;
    type Profile = SpectrumProfile;
    type Classification = SpectrumClassification;

    fn validate_profile(q: &SpectrumQuestionnaire) -> Result<SpectrumProfile, ValidationError> {
        let orbit_type = q.orbit_type.ok_or(ValidationError::MissingField {
            field: "orbit type",
        })?;
        if q.services.is_empty() {
            return Err(ValidationError::MissingField { field: "services" });
        }
        if q.bands.is_empty() {
            return Err(ValidationError::MissingField { field: "bands" });
        }
        let satellite_count = q.satellite_count.unwrap_or(1);
        if satellite_count == 0 {
            return Err(ValidationError::OutOfRange {
                field: "satellite count",
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            });
        }
        if orbit_type == OrbitType::Gso && satellite_count > 1 {
            tracing::debug!(satellite_count, "GSO network with several satellites");
        }
        if let (Some(api), Some(biu)) = (q.api_date, q.planned_bring_into_use) {
            if biu < api {
                return Err(ValidationError::InconsistentFields {
                    message: format!("planned bring-into-use {biu} precedes the API date {api}"),
                });
            }
        }
        let notifying_administration = match q.notifying_administration.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(code.to_ascii_uppercase())
            }
            Some(code) => {
                return Err(ValidationError::InvalidValue {
                    field: "notifying administration",
                    value: code.to_string(),
                    expected: "ISO 3166-1 alpha-2 code",
                })
            }
        };

        Ok(SpectrumProfile {
            orbit_type,
            services: dedup(&q.services),
            bands: dedup(&q.bands),
            satellite_count,
            api_date: q.api_date,
            planned_bring_into_use: q.planned_bring_into_use,
            notifying_administration,
        })
    }

    fn classify(profile: &SpectrumProfile) -> SpectrumClassification {
        let biu_limit = profile.biu_limit();
        SpectrumClassification {
            orbit_type: profile.orbit_type,
            filing_procedure: profile.filing_procedure(),
            biu_limit,
            planned_bring_into_use: profile.planned_bring_into_use,
            milestones: if profile.milestones_apply() {
                res35_milestones(profile.satellite_count, biu_limit)
            } else {
                Vec::new()
            },
            epfd_limits_apply: profile.epfd_applies(),
            warnings: timeline_warnings(profile),
            notifying_administration: profile.notifying_administration.clone(),
        }
    }

    fn catalog() -> &'static [Requirement<SpectrumProfile>] {
        CATALOG
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static CATALOG: &[Requirement<SpectrumProfile>] = &[
    Requirement {
        id: "itu.licence",
        article: "RR 18.1",
        title: "National radio licence for space stations",
        category: "licensing",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Authorization,
        cross_refs: &["esa.auth.01"],
        remediation: "Obtain a licence from the notifying administration for every space and earth station before transmitting.",
        applies: |_| true,
    },
    Requirement {
        id: "itu.api",
        article: "RR 9.1",
        title: "Advance publication information",
        category: "filing",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Have the administration submit the API to the Radiocommunication Bureau between 2 and 7 years before bring-into-use.",
        applies: |p| p.filing_procedure() != FilingProcedure::Coordination,
    },
    Requirement {
        id: "itu.coord",
        article: "RR 9.6-9.7",
        title: "Coordination request and completion",
        category: "filing",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Submit the coordination request and complete coordination with affected administrations before notification.",
        applies: |p| p.filing_procedure() == FilingProcedure::Coordination,
    },
    Requirement {
        id: "itu.art11",
        article: "RR Art. 11",
        title: "Notification and recording in the Master Register",
        category: "filing",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Notify the frequency assignments and confirm bring-into-use within the regulatory period.",
        applies: |_| true,
    },
    Requirement {
        id: "itu.res49",
        article: "Res. 49",
        title: "Administrative due diligence",
        category: "filing",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Submit the due diligence information (manufacturer, launch provider, contract dates) before the BIU limit.",
        applies: |p| p.filing_procedure() == FilingProcedure::Coordination,
    },
    Requirement {
        id: "itu.costrecovery",
        article: "Decision 482",
        title: "Satellite network filing cost recovery",
        category: "filing",
        severity: Severity::Low,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Pay the Bureau's processing fees for each filing before the due date to avoid cancellation.",
        applies: |p| p.filing_procedure() != FilingProcedure::IaruCoordination,
    },
    Requirement {
        id: "itu.res35",
        article: "Res. 35 (WRC-19)",
        title: "NGSO deployment milestones",
        category: "milestones",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Plan launches to deploy 10%, 50% and 100% of the system by the milestone dates and report deployment to the Bureau.",
        applies: |p| p.milestones_apply(),
    },
    Requirement {
        id: "itu.art22.epfd",
        article: "RR Art. 22",
        title: "Equivalent power flux-density limits",
        category: "technical",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Interference,
        cross_refs: &[],
        remediation: "Demonstrate compliance with EPFD limits protecting GSO networks, using the Bureau's validation software.",
        applies: |p| p.epfd_applies(),
    },
    Requirement {
        id: "itu.art21.pfd",
        article: "RR Art. 21",
        title: "Power flux-density limits at the Earth's surface",
        category: "technical",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Interference,
        cross_refs: &[],
        remediation: "Verify that the downlink PFD stays within the Art. 21 limits for bands shared with terrestrial services.",
        applies: |p| p.has_band(Band::shares_with_terrestrial),
    },
    Requirement {
        id: "itu.art15",
        article: "RR Art. 15",
        title: "Avoidance and reporting of harmful interference",
        category: "operations",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Interference,
        cross_refs: &[],
        remediation: "Maintain an interference reporting procedure with the administration and the ability to cease emissions on request.",
        applies: |_| true,
    },
    Requirement {
        id: "itu.iaru",
        article: "RR 25 / IARU",
        title: "IARU amateur frequency coordination",
        category: "filing",
        severity: Severity::High,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Request frequency coordination from the IARU satellite advisory panel before filing.",
        applies: |p| p.has_service(|s| s == RadioService::Amateur),
    },
    Requirement {
        id: "itu.ttc",
        article: "RR 1.23 / Res. 659",
        title: "TT&C in allocated space operation bands",
        category: "technical",
        severity: Severity::Low,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::SpectrumFiling,
        cross_refs: &[],
        remediation: "Place telemetry, tracking and command carriers in bands allocated to the space operation service.",
        applies: |p| p.orbit_type == OrbitType::Ngso,
    },
    Requirement {
        id: "itu.records",
        article: "RR Appendix 4",
        title: "Records of station parameters and licence conditions",
        category: "operations",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::Recordkeeping,
        cross_refs: &[],
        remediation: "Keep Appendix 4 parameters, licence conditions and coordination agreements on file and up to date.",
        applies: |_| true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ngso_ku(count: u32) -> SpectrumQuestionnaire {
        SpectrumQuestionnaire {
            orbit_type: Some(OrbitType::Ngso),
            services: vec![RadioService::Fss],
            bands: vec![Band::Ku, Band::Ka],
            satellite_count: Some(count),
            api_date: Some(date(2024, 3, 1)),
            planned_bring_into_use: Some(date(2028, 6, 1)),
            ..Default::default()
        }
    }

    fn classify(q: &SpectrumQuestionnaire) -> SpectrumClassification {
        SpectrumEngine::classify(&SpectrumEngine::validate_profile(q).unwrap())
    }

    #[test]
    fn procedure_selection() {
        assert_eq!(classify(&ngso_ku(100)).filing_procedure, FilingProcedure::Coordination);

        let eess = SpectrumQuestionnaire {
            orbit_type: Some(OrbitType::Ngso),
            services: vec![RadioService::Eess],
            bands: vec![Band::X, Band::S],
            ..Default::default()
        };
        assert_eq!(classify(&eess).filing_procedure, FilingProcedure::AdvancePublication);

        let mut gso = eess.clone();
        gso.orbit_type = Some(OrbitType::Gso);
        assert_eq!(classify(&gso).filing_procedure, FilingProcedure::Coordination);

        let cubesat = SpectrumQuestionnaire {
            orbit_type: Some(OrbitType::Ngso),
            services: vec![RadioService::Amateur],
            bands: vec![Band::Uhf],
            ..Default::default()
        };
        assert_eq!(classify(&cubesat).filing_procedure, FilingProcedure::IaruCoordination);
    }

    #[test]
    fn milestones_for_ngso_broadband() {
        let c = classify(&ngso_ku(250));
        assert_eq!(c.biu_limit, Some(date(2031, 3, 1)));
        assert_eq!(c.milestones.len(), 3);
        assert_eq!(c.milestones[0].satellites_required, 25);
        assert_eq!(c.milestones[0].due, Some(date(2033, 3, 1)));
        assert_eq!(c.milestones[1].satellites_required, 125);
        assert_eq!(c.milestones[1].due, Some(date(2036, 3, 1)));
        assert_eq!(c.milestones[2].satellites_required, 250);
        assert_eq!(c.milestones[2].due, Some(date(2038, 3, 1)));
        assert!(c.epfd_limits_apply);
    }

    #[test]
    fn milestone_counts_round_up() {
        let m = res35_milestones(7, None);
        assert_eq!(m[0].satellites_required, 1);
        assert_eq!(m[1].satellites_required, 4);
        assert_eq!(m[2].satellites_required, 7);
        assert!(m.iter().all(|m| m.due.is_none()));
    }

    #[test]
    fn gso_has_no_milestones_or_epfd() {
        let mut q = ngso_ku(1);
        q.orbit_type = Some(OrbitType::Gso);
        let c = classify(&q);
        assert!(c.milestones.is_empty());
        assert!(!c.epfd_limits_apply);
    }

    #[test]
    fn timeline_warnings_fire() {
        let mut late = ngso_ku(10);
        late.planned_bring_into_use = Some(date(2031, 3, 2));
        assert_eq!(classify(&late).warnings.len(), 1);

        let mut rushed = ngso_ku(10);
        rushed.planned_bring_into_use = Some(date(2025, 1, 1));
        assert!(classify(&rushed).warnings[0].contains("less than 2 years"));

        assert!(classify(&ngso_ku(10)).warnings.is_empty());
    }

    #[test]
    fn biu_before_api_rejected() {
        let mut q = ngso_ku(10);
        q.planned_bring_into_use = Some(date(2023, 1, 1));
        assert!(matches!(
            SpectrumEngine::validate_profile(&q),
            Err(ValidationError::InconsistentFields { .. })
        ));
    }

    #[test]
    fn empty_services_rejected() {
        let mut q = ngso_ku(10);
        q.services.clear();
        assert_eq!(
            SpectrumEngine::validate_profile(&q).unwrap_err().to_string(),
            "services is required"
        );
    }

    #[test]
    fn catalog_follows_procedure() {
        let p = SpectrumEngine::validate_profile(&ngso_ku(100)).unwrap();
        let ids: Vec<_> = SpectrumEngine::applicable_requirements(&p)
            .iter()
            .map(|r| r.id)
            .collect();
        assert!(ids.contains(&"itu.coord"));
        assert!(ids.contains(&"itu.res35"));
        assert!(!ids.contains(&"itu.api"));
        assert!(!ids.contains(&"itu.iaru"));
    }
}

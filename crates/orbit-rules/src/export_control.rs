//! # Export Control Engine (ITAR / EAR)
//!
//! Jurisdiction and licensing determination for space items under the US
//! International Traffic in Arms Regulations and Export Administration
//! Regulations.
//!
//! ## Jurisdiction
//!
//! 1. Specially designed for defence: ITAR, USML Category XV.
//! 2. US origin, or foreign-made with US content above the de minimis
//!    threshold: EAR. Spacecraft items fall under the 9x515 entries and
//!    generic ground equipment under EAR99.
//! 3. Otherwise not subject to US export jurisdiction.
//!
//! The de minimis threshold is 25%, except for 9x515 items bound for
//! Country Group D:5 or E:1, where any US content is enough.
//!
//! ## Licensing per destination
//!
//! | Item   | Embargoed  | D:5        | Canada       | A:5          | Other            |
//! |--------|------------|------------|--------------|--------------|------------------|
//! | ITAR   | prohibited | prohibited | licence      | licence      | licence          |
//! | 9x515  | prohibited | prohibited | not required | STA          | licence          |
//! | EAR99  | prohibited | none       | none         | none         | none             |
//!
//! Military end use escalates anything short of a licence to a licence
//! requirement outside A:5 and Canada.

use std::fmt;

use serde::{Deserialize, Serialize};

use orbit_core::{BindingLevel, ControlTopic, Framework, Severity, ValidationError};

use crate::catalog::Requirement;
use crate::engine::{FrameworkClassification, RegulatoryEngine};

/// General de minimis threshold, percent of US content.
pub const DE_MINIMIS_PERCENT: f64 = 25.0;

const EMBARGOED: &[&str] = &["CU", "IR", "KP", "SY"];

const D5: &[&str] = &[
    "AF", "BY", "CD", "CF", "CN", "ER", "HT", "IQ", "KH", "LB", "LY", "MM", "NI", "RU", "SD", "SO",
    "SS", "VE", "ZW",
];

const A5: &[&str] = &[
    "AR", "AT", "AU", "BE", "BG", "CA", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GB", "GR",
    "HR", "HU", "IE", "IN", "IS", "IT", "JP", "KR", "LT", "LU", "LV", "MT", "NL", "NO", "NZ", "PL",
    "PT", "RO", "SE", "SI", "SK", "TR",
];

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Item being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Complete spacecraft.
    Spacecraft,
    /// Spacecraft parts, components, and subsystems.
    SpacecraftComponent,
    /// Radiation-hardened microelectronics.
    RadiationHardenedElectronics,
    /// Spacecraft propulsion.
    Propulsion,
    /// Generic ground station equipment.
    GroundEquipment,
    /// Test, inspection, and production equipment for spacecraft.
    TestEquipment,
    /// Software for spacecraft items.
    Software,
    /// Technical data and technology.
    Technology,
    /// Remote sensing payloads.
    RemoteSensingPayload,
}

impl ItemCategory {
    /// EAR control entry for the category.
    pub fn ear_entry(self) -> &'static str {
        match self {
            Self::Spacecraft
            | Self::SpacecraftComponent
            | Self::RadiationHardenedElectronics
            | Self::Propulsion
            | Self::RemoteSensingPayload => "9A515",
            Self::TestEquipment => "9B515",
            Self::Software => "9D515",
            Self::Technology => "9E515",
            Self::GroundEquipment => "EAR99",
        }
    }

    fn is_9x515(self) -> bool {
        self != Self::GroundEquipment
    }
}

/// Export jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// State Department, USML.
    Itar,
    /// Commerce Department, CCL.
    Ear,
    /// Not subject to US export jurisdiction.
    NotSubject,
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Itar => write!(f, "ITAR"),
            Self::Ear => write!(f, "EAR"),
            Self::NotSubject => write!(f, "not subject"),
        }
    }
}

/// Country group of a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryGroup {
    /// The United States itself.
    Domestic,
    /// Comprehensive embargo (E:1/E:2).
    Embargoed,
    /// US arms embargo (D:5).
    D5,
    /// Close allies eligible for STA (A:5).
    A5,
    /// Everyone else.
    Other,
}

impl CountryGroup {
    /// Group of an ISO-2 code (upper case).
    pub fn of(code: &str) -> Self {
        if code == "US" {
            Self::Domestic
        } else if EMBARGOED.contains(&code) {
            Self::Embargoed
        } else if D5.contains(&code) {
            Self::D5
        } else if A5.contains(&code) {
            Self::A5
        } else {
            Self::Other
        }
    }
}

/// Licence outcome for one destination, least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseRequirement {
    /// No licence needed.
    NotRequired,
    /// Licence exception available (STA).
    LicenseException,
    /// Licence application required.
    LicenseRequired,
    /// Export denied by policy.
    Prohibited,
}

/// Raw questionnaire answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportQuestionnaire {
    /// Item category. Required.
    pub item_category: Option<ItemCategory>,
    /// Specially designed for a defence article.
    pub specially_designed_for_defense: Option<bool>,
    /// Known or intended military end use.
    pub military_end_use: Option<bool>,
    /// Item produced in the US.
    pub us_origin: Option<bool>,
    /// Controlled US content by value, percent.
    pub us_content_percent: Option<f64>,
    /// Destination ISO-2 codes.
    pub destinations: Vec<String>,
    /// Foreign nationals have access to the item or technology.
    pub foreign_national_access: Option<bool>,
}

/// Validated profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportProfile {
    /// Item category.
    pub item_category: ItemCategory,
    /// Defence article.
    pub specially_designed_for_defense: bool,
    /// Military end use.
    pub military_end_use: bool,
    /// US origin.
    pub us_origin: bool,
    /// US content, percent.
    pub us_content_percent: f64,
    /// Destinations, upper-cased and deduplicated.
    pub destinations: Vec<String>,
    /// Foreign national access.
    pub foreign_national_access: bool,
}

impl ExportProfile {
    /// De minimis threshold for a destination group.
    pub fn de_minimis_threshold(&self, group: CountryGroup) -> f64 {
        if self.item_category.is_9x515()
            && matches!(group, CountryGroup::D5 | CountryGroup::Embargoed)
        {
            0.0
        } else {
            DE_MINIMIS_PERCENT
        }
    }

    fn subject_to_ear(&self, group: CountryGroup) -> bool {
        self.us_origin || self.us_content_percent > self.de_minimis_threshold(group)
    }

    /// Overall jurisdiction, taking the strictest destination.
    pub fn jurisdiction(&self) -> Jurisdiction {
        if self.specially_designed_for_defense {
            return Jurisdiction::Itar;
        }
        let any_dest = self
            .destinations
            .iter()
            .any(|d| self.subject_to_ear(CountryGroup::of(d)));
        if any_dest || self.subject_to_ear(CountryGroup::Other) {
            Jurisdiction::Ear
        } else {
            Jurisdiction::NotSubject
        }
    }

    /// Control list entry.
    pub fn control_entry(&self) -> Option<&'static str> {
        match self.jurisdiction() {
            Jurisdiction::Itar => Some("USML XV"),
            Jurisdiction::Ear => Some(self.item_category.ear_entry()),
            Jurisdiction::NotSubject => None,
        }
    }

    fn controlled(&self) -> bool {
        self.jurisdiction() != Jurisdiction::NotSubject
    }

    fn controlled_beyond_ear99(&self) -> bool {
        match self.jurisdiction() {
            Jurisdiction::Itar => true,
            Jurisdiction::Ear => self.item_category.is_9x515(),
            Jurisdiction::NotSubject => false,
        }
    }

    /// Licensing determination for one destination.
    pub fn determine(&self, country: &str) -> DestinationDetermination {
        let group = CountryGroup::of(country);
        let (license, basis) = if group == CountryGroup::Domestic {
            (LicenseRequirement::NotRequired, "not an export")
        } else if group == CountryGroup::Embargoed {
            (LicenseRequirement::Prohibited, "comprehensive embargo")
        } else if self.specially_designed_for_defense {
            match group {
                CountryGroup::D5 => (LicenseRequirement::Prohibited, "ITAR 126.1 arms embargo"),
                _ => (LicenseRequirement::LicenseRequired, "ITAR DSP-5 licence"),
            }
        } else if !self.subject_to_ear(group) {
            (LicenseRequirement::NotRequired, "below de minimis")
        } else if self.item_category.is_9x515() {
            match group {
                CountryGroup::D5 => (LicenseRequirement::Prohibited, "EAR 744.21 / D:5 policy of denial"),
                _ if country == "CA" => (LicenseRequirement::NotRequired, "9x515 Canada exclusion"),
                CountryGroup::A5 => (LicenseRequirement::LicenseException, "License Exception STA (740.20)"),
                _ => (LicenseRequirement::LicenseRequired, "EAR 9x515 licence"),
            }
        } else {
            (LicenseRequirement::NotRequired, "EAR99 NLR")
        };

        let escalate = self.military_end_use
            && license < LicenseRequirement::LicenseRequired
            && self.controlled()
            && !matches!(group, CountryGroup::Domestic | CountryGroup::A5)
            && country != "CA";
        let (license, basis) = if escalate {
            (LicenseRequirement::LicenseRequired, "military end use (EAR 744.21)")
        } else {
            (license, basis)
        };

        DestinationDetermination {
            country: country.to_string(),
            group,
            subject_to_us_jurisdiction: self.specially_designed_for_defense
                || self.subject_to_ear(group),
            license,
            basis: basis.to_string(),
        }
    }

    fn determinations(&self) -> Vec<DestinationDetermination> {
        self.destinations.iter().map(|d| self.determine(d)).collect()
    }

    fn needs_license(&self) -> bool {
        self.determinations()
            .iter()
            .any(|d| d.license == LicenseRequirement::LicenseRequired)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Licensing outcome for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationDetermination {
    /// ISO-2 code.
    pub country: String,
    /// Country group.
    pub group: CountryGroup,
    /// Whether US jurisdiction reaches this shipment.
    pub subject_to_us_jurisdiction: bool,
    /// Licence outcome.
    pub license: LicenseRequirement,
    /// Regulatory basis of the outcome.
    pub basis: String,
}

/// Export control classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportClassification {
    /// Jurisdiction.
    pub jurisdiction: Jurisdiction,
    /// USML category or ECCN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_entry: Option<String>,
    /// US content, percent.
    pub us_content_percent: f64,
    /// Per-destination outcomes, in input order.
    pub destinations: Vec<DestinationDetermination>,
    /// Most restrictive outcome across destinations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_restrictive: Option<LicenseRequirement>,
    /// Foreign-national access to an item controlled beyond EAR99 (ITAR, or
    /// an EAR 9x515 entry). EAR99 items are never flagged.
    pub deemed_export_risk: bool,
}

impl From<ExportClassification> for FrameworkClassification {
    fn from(c: ExportClassification) -> Self {
        FrameworkClassification::ExportControl(c)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Export control engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportControlEngine;

impl RegulatoryEngine for ExportControlEngine {
    const FRAMEWORK: Framework = Framework::ExportControl;
    const CATALOG_VERSION: &'static str = "itar-ear-2024.1";

    type Questionnaire = ExportQuestionnaire;
    type Profile = ExportProfile;
    type Classification = ExportClassification;

    fn validate_profile(q: &ExportQuestionnaire) -> Result<ExportProfile, ValidationError> {
        let item_category = q.item_category.ok_or(ValidationError::MissingField {
            field: "item category",
        })?;
        let us_content = q.us_content_percent.unwrap_or(0.0);
        if !(0.0..=100.0).contains(&us_content) {
            return Err(ValidationError::OutOfRange {
                field: "US content percent",
                value: us_content,
                min: 0.0,
                max: 100.0,
            });
        }

        let mut destinations: Vec<String> = Vec::with_capacity(q.destinations.len());
        for raw in &q.destinations {
            let code = raw.trim();
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ValidationError::InvalidValue {
                    field: "destination",
                    value: raw.clone(),
                    expected: "ISO 3166-1 alpha-2 code",
                });
            }
            let code = code.to_ascii_uppercase();
            if !destinations.contains(&code) {
                destinations.push(code);
            }
        }

        Ok(ExportProfile {
            item_category,
            specially_designed_for_defense: q.specially_designed_for_defense.unwrap_or(false),
            military_end_use: q.military_end_use.unwrap_or(false),
            us_origin: q.us_origin.unwrap_or(false),
            us_content_percent: us_content,
            destinations,
            foreign_national_access: q.foreign_national_access.unwrap_or(false),
        })
    }

    fn classify(profile: &ExportProfile) -> ExportClassification {
        let destinations = profile.determinations();
        ExportClassification {
            jurisdiction: profile.jurisdiction(),
            control_entry: profile.control_entry().map(str::to_string),
            us_content_percent: profile.us_content_percent,
            most_restrictive: destinations.iter().map(|d| d.license).max(),
            destinations,
            deemed_export_risk: profile.foreign_national_access
                && profile.controlled_beyond_ear99(),
        }
    }

    fn catalog() -> &'static [Requirement<ExportProfile>] {
        CATALOG
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static CATALOG: &[Requirement<ExportProfile>] = &[
    Requirement {
        id: "exp.ddtc.registration",
        article: "ITAR 122.1",
        title: "DDTC registration",
        category: "itar",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Registration,
        cross_refs: &[],
        remediation: "Register with the Directorate of Defense Trade Controls and renew annually.",
        applies: |p| p.jurisdiction() == Jurisdiction::Itar,
    },
    Requirement {
        id: "exp.jurisdiction",
        article: "ITAR 120.11 / EAR 748.3",
        title: "Jurisdiction and classification determination",
        category: "classification",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::ExportLicensing,
        cross_refs: &[],
        remediation: "Document the order-of-review analysis, or obtain a commodity jurisdiction or CCATS ruling, for each item.",
        applies: |_| true,
    },
    Requirement {
        id: "exp.licence",
        article: "ITAR 123.1 / EAR 748",
        title: "Export licences for controlled destinations",
        category: "licensing",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::ExportLicensing,
        cross_refs: &[],
        remediation: "Apply for DSP-5 or BIS licences for each destination that requires one before shipment or release.",
        applies: |p| p.needs_license(),
    },
    Requirement {
        id: "exp.deminimis",
        article: "EAR 734.4",
        title: "De minimis US content calculation",
        category: "classification",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::ExportLicensing,
        cross_refs: &[],
        remediation: "Calculate controlled US content by value for each foreign-made item and keep the calculation on file.",
        applies: |p| !p.us_origin && !p.specially_designed_for_defense && p.us_content_percent > 0.0,
    },
    Requirement {
        id: "exp.tcp",
        article: "ITAR 120.54 / EAR 734.13(b)",
        title: "Technology control plan for foreign national access",
        category: "deemed_export",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::AccessControl,
        cross_refs: &["nis2.art21.2i"],
        remediation: "Adopt a technology control plan restricting foreign national access, or obtain deemed export licences.",
        applies: |p| p.foreign_national_access && p.controlled_beyond_ear99(),
    },
    Requirement {
        id: "exp.screening",
        article: "EAR 744 / OFAC",
        title: "Restricted party screening",
        category: "screening",
        severity: Severity::Critical,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Screening,
        cross_refs: &[],
        remediation: "Screen every customer, consignee and end user against the consolidated screening list before each transaction.",
        applies: |p| !p.destinations.is_empty(),
    },
    Requirement {
        id: "exp.enduse",
        article: "EAR 744.21-22",
        title: "End-use and end-user checks",
        category: "screening",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Screening,
        cross_refs: &[],
        remediation: "Obtain end-use statements and check for military or prohibited end uses before export.",
        applies: |p| p.controlled() && !p.destinations.is_empty(),
    },
    Requirement {
        id: "exp.eei",
        article: "EAR 758.1",
        title: "Electronic export information filing",
        category: "licensing",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Recordkeeping,
        cross_refs: &[],
        remediation: "File EEI in AES for each controlled shipment, citing the licence or exception used.",
        applies: |p| {
            p.controlled()
                && p.destinations
                    .iter()
                    .any(|d| CountryGroup::of(d) != CountryGroup::Domestic)
        },
    },
    Requirement {
        id: "exp.records",
        article: "ITAR 122.5 / EAR 762",
        title: "Five-year export recordkeeping",
        category: "compliance_program",
        severity: Severity::Low,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Recordkeeping,
        cross_refs: &[],
        remediation: "Retain licences, classifications, shipping and screening records for five years from the export.",
        applies: |p| p.controlled(),
    },
    Requirement {
        id: "exp.empowered",
        article: "ITAR 120.67",
        title: "Empowered official",
        category: "itar",
        severity: Severity::High,
        binding: BindingLevel::Mandatory,
        topic: ControlTopic::Governance,
        cross_refs: &[],
        remediation: "Appoint an empowered official authorised to sign licence applications and stop transactions.",
        applies: |p| p.jurisdiction() == Jurisdiction::Itar,
    },
    Requirement {
        id: "exp.training",
        article: "Export compliance program",
        title: "Export compliance training",
        category: "compliance_program",
        severity: Severity::Low,
        binding: BindingLevel::Recommended,
        topic: ControlTopic::Training,
        cross_refs: &[],
        remediation: "Train engineering, sales and logistics staff on jurisdiction, licensing and red flags annually.",
        applies: |p| p.controlled(),
    },
    Requirement {
        id: "exp.vsd",
        article: "ITAR 127.12 / EAR 764.5",
        title: "Voluntary disclosure procedure",
        category: "compliance_program",
        severity: Severity::Low,
        binding: BindingLevel::BestPractice,
        topic: ControlTopic::Governance,
        cross_refs: &[],
        remediation: "Define how suspected violations are investigated and voluntarily disclosed to DDTC or BIS.",
        applies: |p| p.controlled(),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn q(category: ItemCategory, dests: &[&str]) -> ExportQuestionnaire {
        ExportQuestionnaire {
            item_category: Some(category),
            us_origin: Some(true),
            destinations: dests.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    fn classify(q: &ExportQuestionnaire) -> ExportClassification {
        ExportControlEngine::classify(&ExportControlEngine::validate_profile(q).unwrap())
    }

    fn outcome(c: &ExportClassification, country: &str) -> LicenseRequirement {
        c.destinations
            .iter()
            .find(|d| d.country == country)
            .map(|d| d.license)
            .unwrap()
    }

    #[test]
    fn defence_article_is_itar() {
        let mut itar = q(ItemCategory::SpacecraftComponent, &["de", "CN", "BR"]);
        itar.specially_designed_for_defense = Some(true);
        let c = classify(&itar);
        assert_eq!(c.jurisdiction, Jurisdiction::Itar);
        assert_eq!(c.control_entry.as_deref(), Some("USML XV"));
        assert_eq!(outcome(&c, "DE"), LicenseRequirement::LicenseRequired);
        assert_eq!(outcome(&c, "CN"), LicenseRequirement::Prohibited);
        assert_eq!(outcome(&c, "BR"), LicenseRequirement::LicenseRequired);
        assert_eq!(c.most_restrictive, Some(LicenseRequirement::Prohibited));
    }

    #[test]
    fn ear_9a515_matrix() {
        let c = classify(&q(ItemCategory::Spacecraft, &["CA", "FR", "CN", "IR", "BR", "US"]));
        assert_eq!(c.jurisdiction, Jurisdiction::Ear);
        assert_eq!(c.control_entry.as_deref(), Some("9A515"));
        assert_eq!(outcome(&c, "CA"), LicenseRequirement::NotRequired);
        assert_eq!(outcome(&c, "FR"), LicenseRequirement::LicenseException);
        assert_eq!(outcome(&c, "CN"), LicenseRequirement::Prohibited);
        assert_eq!(outcome(&c, "IR"), LicenseRequirement::Prohibited);
        assert_eq!(outcome(&c, "BR"), LicenseRequirement::LicenseRequired);
        assert_eq!(outcome(&c, "US"), LicenseRequirement::NotRequired);
    }

    #[test]
    fn control_entries_by_category() {
        assert_eq!(ItemCategory::Software.ear_entry(), "9D515");
        assert_eq!(ItemCategory::Technology.ear_entry(), "9E515");
        assert_eq!(ItemCategory::TestEquipment.ear_entry(), "9B515");
        assert_eq!(ItemCategory::GroundEquipment.ear_entry(), "EAR99");
    }

    #[test]
    fn ear99_only_blocked_by_embargo() {
        let c = classify(&q(ItemCategory::GroundEquipment, &["CN", "SY", "BR"]));
        assert_eq!(c.control_entry.as_deref(), Some("EAR99"));
        assert_eq!(outcome(&c, "CN"), LicenseRequirement::NotRequired);
        assert_eq!(outcome(&c, "SY"), LicenseRequirement::Prohibited);
        assert_eq!(outcome(&c, "BR"), LicenseRequirement::NotRequired);
    }

    #[test]
    fn de_minimis_thresholds() {
        let foreign = |percent: f64, dests: &[&str]| ExportQuestionnaire {
            item_category: Some(ItemCategory::SpacecraftComponent),
            us_content_percent: Some(percent),
            destinations: dests.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        };

        // 25% exactly is not above the threshold.
        let c = classify(&foreign(25.0, &["BR"]));
        assert_eq!(c.jurisdiction, Jurisdiction::NotSubject);
        assert_eq!(outcome(&c, "BR"), LicenseRequirement::NotRequired);

        let c = classify(&foreign(25.5, &["BR"]));
        assert_eq!(c.jurisdiction, Jurisdiction::Ear);
        assert_eq!(outcome(&c, "BR"), LicenseRequirement::LicenseRequired);

        // Any US content counts for 9x515 going to D:5.
        let c = classify(&foreign(1.0, &["BR", "CN"]));
        assert_eq!(c.jurisdiction, Jurisdiction::Ear);
        assert_eq!(outcome(&c, "BR"), LicenseRequirement::NotRequired);
        assert_eq!(outcome(&c, "CN"), LicenseRequirement::Prohibited);
    }

    #[test]
    fn military_end_use_escalates() {
        let mut ground = q(ItemCategory::GroundEquipment, &["BR", "DE"]);
        ground.military_end_use = Some(true);
        let c = classify(&ground);
        assert_eq!(outcome(&c, "BR"), LicenseRequirement::LicenseRequired);
        assert_eq!(outcome(&c, "DE"), LicenseRequirement::NotRequired);
    }

    #[test]
    fn deemed_export_skips_ear99_items() {
        let mut ground = q(ItemCategory::GroundEquipment, &["DE"]);
        ground.foreign_national_access = Some(true);
        let c = classify(&ground);
        assert_eq!(c.jurisdiction, Jurisdiction::Ear);
        assert_eq!(c.control_entry.as_deref(), Some("EAR99"));
        assert!(!c.deemed_export_risk);
    }

    #[test]
    fn deemed_export_needs_controlled_item() {
        let mut tech = q(ItemCategory::Technology, &[]);
        tech.foreign_national_access = Some(true);
        assert!(classify(&tech).deemed_export_risk);

        let mut ground = q(ItemCategory::GroundEquipment, &[]);
        ground.foreign_national_access = Some(true);
        assert!(!classify(&ground).deemed_export_risk);
    }

    #[test]
    fn destinations_validated_and_deduplicated() {
        let p = ExportControlEngine::validate_profile(&q(ItemCategory::Spacecraft, &["fr", "FR", " de "]))
            .unwrap();
        assert_eq!(p.destinations, vec!["FR".to_string(), "DE".to_string()]);
        assert!(ExportControlEngine::validate_profile(&q(ItemCategory::Spacecraft, &["France"])).is_err());
    }

    #[test]
    fn content_percent_bounds() {
        let mut bad = q(ItemCategory::Spacecraft, &[]);
        bad.us_content_percent = Some(101.0);
        assert!(matches!(
            ExportControlEngine::validate_profile(&bad),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn itar_catalog() {
        let mut itar = q(ItemCategory::Spacecraft, &["BR"]);
        itar.specially_designed_for_defense = Some(true);
        let p = ExportControlEngine::validate_profile(&itar).unwrap();
        let ids: Vec<_> = ExportControlEngine::applicable_requirements(&p)
            .iter()
            .map(|r| r.id)
            .collect();
        assert!(ids.contains(&"exp.ddtc.registration"));
        assert!(ids.contains(&"exp.empowered"));
        assert!(ids.contains(&"exp.licence"));
        assert!(!ids.contains(&"exp.deminimis"));
    }
}

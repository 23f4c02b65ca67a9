//! # orbit-rules: Regulatory Rule Engines
//!
//! One engine per regulatory framework, all implementing
//! [`RegulatoryEngine`]:
//!
//! - **EU Space Act** (`eu_space_act.rs`): operator classification, light
//!   regime, authorisation, safety, resilience and environmental modules.
//!
//! - **NIS2** (`nis2.rs`): essential/important entity classification, fines,
//!   supervision, and Art. 21 risk-management measures.
//!
//! - **COPUOS / IADC** (`copuos.rs`): orbital lifetime, 25- and 5-year
//!   rules, GEO graveyard raise, casualty risk.
//!
//! - **Spectrum / ITU** (`spectrum.rs`): filing procedure, bring-into-use
//!   limit, Resolution 35 milestones.
//!
//! - **Export control** (`export_control.rs`): ITAR/EAR jurisdiction, de
//!   minimis, per-destination licensing.
//!
//! Alongside the engines:
//!
//! - **Incident classification** (`incident.rs`): severity and
//!   multi-regime notification deadlines.
//!
//! - **Cross-regulation** (`cross_regulation.rs`): topic overlap,
//!   cross-reference graph, evidence reuse.
//!
//! - **Dispatch** (`dispatch.rs`): framework-keyed JSON entry points for the
//!   API and CLI.
//!
//! ## Crate Policy
//!
//! - Depends only on `orbit-core` internally.
//! - Engines are pure: no I/O, no clocks. Callers pass `as_of` / `now`.
//! - Requirement ids are unique across all catalogs and every cross
//!   reference resolves; `tests/catalog_integrity.rs` enforces both.

pub mod catalog;
pub mod copuos;
pub mod cross_regulation;
pub mod dispatch;
pub mod engine;
pub mod eu_space_act;
pub mod export_control;
pub mod incident;
pub mod nis2;
pub mod sizing;
pub mod spectrum;

pub use catalog::{CatalogInfo, Requirement, RequirementSummary};
pub use copuos::CopuosEngine;
pub use cross_regulation::{
    analyze_overlap, cross_reference_graph, suggest_evidence_reuse, EvidenceReuse, OverlapReport,
};
pub use dispatch::{
    applicable_summaries, assess_value, catalog_info, catalog_summaries, classify_value,
    find_requirement, validate_status_update, ClassificationResult,
};
pub use engine::{AssessmentReport, FrameworkClassification, RegulatoryEngine, StatusMap};
pub use eu_space_act::EuSpaceActEngine;
pub use export_control::ExportControlEngine;
pub use incident::{classify_incident, IncidentClassification, IncidentReport};
pub use nis2::Nis2Engine;
pub use sizing::EntitySize;
pub use spectrum::SpectrumEngine;

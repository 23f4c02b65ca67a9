//! # API Route Modules
//!
//! - `frameworks`: catalog listing and questionnaire classification.
//! - `assessments`: assessment CRUD, status updates, and derived reports.
//! - `incidents`: incident severity and notification deadlines.
//! - `cross_regulation`: overlap analysis and evidence reuse.

pub mod assessments;
pub mod cross_regulation;
pub mod frameworks;
pub mod incidents;

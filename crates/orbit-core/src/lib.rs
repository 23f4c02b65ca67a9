#![deny(missing_docs)]

//! # orbit-core: Foundational Types for the Orbit Compliance Stack
//!
//! This crate defines the types that every rule engine in the workspace
//! shares. It has no internal crate dependencies: only `serde`,
//! `serde_json`, `thiserror`, `chrono`, `uuid`, and `sha2`.
//!
//! ## Design Principles
//!
//! 1. **Single [`Framework`] enum.** One definition of the regulatory
//!    frameworks, exhaustive `match` everywhere. Adding a framework forces
//!    every dispatcher to handle it.
//!
//! 2. **One scoring formula.** Every engine scores through
//!    [`calculate_compliance_score`]. Severity weights and the treatment of
//!    `not_applicable` live in exactly one place.
//!
//! 3. **Fixed gap ordering.** [`sort_gaps`] is the only ordering used for
//!    gap analyses, so reports from different frameworks read the same way.
//!
//! 4. **[`OrbitError`] hierarchy.** Structured errors with `thiserror`: no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod framework;
pub mod gap;
pub mod identity;
pub mod score;
pub mod severity;
pub mod status;
pub mod temporal;
pub mod topic;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::{content_digest, ContentDigest};
pub use error::{OrbitError, ValidationError};
pub use framework::Framework;
pub use gap::{build_recommendations, sort_gaps, Gap, Priority, Recommendation};
pub use identity::{AssessmentId, OperatorId, RequirementId};
pub use score::{calculate_compliance_score, ComplianceScore, RiskLevel, StatusCounts};
pub use severity::{BindingLevel, Severity};
pub use status::RequirementStatus;
pub use temporal::{Deadline, DeadlineStatus, Timestamp};
pub use topic::ControlTopic;

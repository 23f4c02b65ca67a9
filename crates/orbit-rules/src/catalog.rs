//! # Requirement Catalogs
//!
//! A catalog is a `&'static` slice of [`Requirement`] records. Each record
//! carries its own applicability predicate over the framework's validated
//! profile type, so "which rules apply" is a linear scan with no lookup
//! tables to keep in sync.
//!
//! [`RequirementSummary`] is the owned, serializable view used in reports,
//! API responses, and catalog digests.

use serde::{Deserialize, Serialize};

use orbit_core::{BindingLevel, ControlTopic, Framework, Severity};

/// A static catalog record.
///
/// `cross_refs` lists identifiers of requirements in *other* catalogs that
/// the same control satisfies. Identifiers are globally unique across
/// catalogs, which the catalog integrity tests enforce.
#[derive(Debug)]
pub struct Requirement<P: 'static> {
    /// Globally unique identifier, e.g. `nis2.art21.2a`.
    pub id: &'static str,
    /// Legal reference.
    pub article: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Category within the framework (module, chapter, or guideline group).
    pub category: &'static str,
    /// Severity: drives the scoring weight and gap order.
    pub severity: Severity,
    /// Legal force.
    pub binding: BindingLevel,
    /// Cross-framework control topic.
    pub topic: ControlTopic,
    /// Related requirements in other catalogs.
    pub cross_refs: &'static [&'static str],
    /// Remediation guidance used in gap analyses.
    pub remediation: &'static str,
    /// Applicability predicate over the validated profile.
    pub applies: fn(&P) -> bool,
}

impl<P> Requirement<P> {
    /// Whether this requirement applies to `profile`.
    pub fn is_applicable(&self, profile: &P) -> bool {
        (self.applies)(profile)
    }

    /// Owned, serializable view of this record.
    pub fn summary(&self, framework: Framework) -> RequirementSummary {
        RequirementSummary {
            id: self.id.to_string(),
            framework,
            article: self.article.to_string(),
            title: self.title.to_string(),
            category: self.category.to_string(),
            severity: self.severity,
            binding: self.binding,
            topic: self.topic,
            cross_refs: self.cross_refs.iter().map(|s| s.to_string()).collect(),
            remediation: self.remediation.to_string(),
        }
    }
}

/// Serializable view of a catalog requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSummary {
    /// Globally unique identifier.
    pub id: String,
    /// Owning framework.
    pub framework: Framework,
    /// Legal reference.
    pub article: String,
    /// Short title.
    pub title: String,
    /// Category within the framework.
    pub category: String,
    /// Severity.
    pub severity: Severity,
    /// Legal force.
    pub binding: BindingLevel,
    /// Cross-framework control topic.
    pub topic: ControlTopic,
    /// Related requirements in other catalogs.
    pub cross_refs: Vec<String>,
    /// Remediation guidance.
    pub remediation: String,
}

/// Version label, size, and content digest of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInfo {
    /// Framework.
    pub framework: Framework,
    /// Human-readable framework name.
    pub title: String,
    /// Catalog version label.
    pub version: String,
    /// Number of requirements in the catalog.
    pub requirement_count: usize,
    /// SHA-256 of the serialized summaries.
    pub digest: String,
}

/// Find a requirement by id in a catalog slice.
pub fn find<P>(catalog: &'static [Requirement<P>], id: &str) -> Option<&'static Requirement<P>> {
    catalog.iter().find(|r| r.id == id)
}

//! # Cross-Regulation Overlap
//!
//! Finds controls that satisfy requirements in more than one framework.
//!
//! Two signals are used:
//!
//! - **Topic overlap.** Every requirement carries a [`ControlTopic`]. A
//!   topic covered by two or more frameworks is one control serving several
//!   regimes, which is where the effort saving comes from.
//! - **Explicit cross references.** Catalog records name related
//!   requirements in other catalogs. The union of those links forms an
//!   undirected graph used to suggest evidence reuse.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use orbit_core::{ControlTopic, Framework, RequirementStatus};

use crate::catalog::RequirementSummary;
use crate::dispatch::all_summaries;
use crate::engine::{status_of, StatusMap};

/// Requirements from several frameworks sharing a control topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOverlap {
    /// Shared topic.
    pub topic: ControlTopic,
    /// Frameworks covering the topic, canonical order.
    pub frameworks: Vec<Framework>,
    /// Requirement ids grouped under the topic, input order.
    pub requirement_ids: Vec<String>,
}

/// An explicit cross reference between two requirements in the input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrossReference {
    /// Lexicographically smaller id.
    pub from: String,
    /// Lexicographically larger id.
    pub to: String,
}

/// Overlap analysis across frameworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapReport {
    /// Frameworks analysed.
    pub frameworks: Vec<Framework>,
    /// Requirements across all frameworks.
    pub total_requirements: usize,
    /// Controls needed when overlapping topics are implemented once.
    pub distinct_controls: usize,
    /// Requirements that fall under an overlapping topic.
    pub shared_requirements: usize,
    /// Saving from implementing overlapping topics once, percent.
    pub effort_reduction_percent: u8,
    /// Overlapping topics, largest first.
    pub overlaps: Vec<TopicOverlap>,
    /// Explicit cross references with both ends in the input.
    pub cross_references: Vec<CrossReference>,
}

/// Group requirement sets by control topic and measure the overlap.
///
/// A topic overlaps when at least two frameworks have a requirement under
/// it. Requirements outside any overlap each count as their own control.
pub fn analyze_overlap(sets: &[(Framework, Vec<RequirementSummary>)]) -> OverlapReport {
    let mut by_topic: BTreeMap<ControlTopic, (BTreeSet<Framework>, Vec<String>)> = BTreeMap::new();
    let mut present: BTreeSet<&str> = BTreeSet::new();
    let mut total = 0usize;

    for (framework, requirements) in sets {
        for r in requirements {
            total += 1;
            present.insert(r.id.as_str());
            let entry = by_topic.entry(r.topic).or_default();
            entry.0.insert(*framework);
            entry.1.push(r.id.clone());
        }
    }

    let mut overlaps: Vec<TopicOverlap> = by_topic
        .into_iter()
        .filter(|(_, (frameworks, _))| frameworks.len() >= 2)
        .map(|(topic, (frameworks, requirement_ids))| TopicOverlap {
            topic,
            frameworks: frameworks.into_iter().collect(),
            requirement_ids,
        })
        .collect();
    overlaps.sort_by(|a, b| {
        b.requirement_ids
            .len()
            .cmp(&a.requirement_ids.len())
            .then(a.topic.cmp(&b.topic))
    });

    let shared: usize = overlaps.iter().map(|o| o.requirement_ids.len()).sum();
    let distinct = overlaps.len() + (total - shared);
    let effort_reduction_percent = if total == 0 {
        0
    } else {
        let saved = (total - distinct) as u64;
        let total = total as u64;
        ((200 * saved + total) / (2 * total)) as u8
    };

    let mut cross_references: Vec<CrossReference> = Vec::new();
    for (_, requirements) in sets {
        for r in requirements {
            for target in &r.cross_refs {
                if present.contains(target.as_str()) {
                    cross_references.push(edge(&r.id, target));
                }
            }
        }
    }
    cross_references.sort();
    cross_references.dedup();

    let mut frameworks: Vec<Framework> = sets.iter().map(|(f, _)| *f).collect();
    frameworks.sort();
    frameworks.dedup();

    tracing::debug!(
        frameworks = frameworks.len(),
        total,
        distinct,
        effort_reduction_percent,
        "overlap analysed"
    );

    OverlapReport {
        frameworks,
        total_requirements: total,
        distinct_controls: distinct,
        shared_requirements: shared,
        effort_reduction_percent,
        overlaps,
        cross_references,
    }
}

fn edge(a: &str, b: &str) -> CrossReference {
    let (from, to) = if a <= b { (a, b) } else { (b, a) };
    CrossReference {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Undirected union of the explicit cross references of every catalog.
///
/// Each link appears once, with `from < to`, sorted.
pub fn cross_reference_graph() -> Vec<CrossReference> {
    let mut edges: BTreeSet<CrossReference> = BTreeSet::new();
    for r in all_summaries() {
        for target in &r.cross_refs {
            edges.insert(edge(&r.id, target));
        }
    }
    edges.into_iter().collect()
}

/// Requirements linked to `id` in the cross-reference graph.
pub fn related_requirements(id: &str) -> Vec<String> {
    cross_reference_graph()
        .into_iter()
        .filter_map(|e| {
            if e.from == id {
                Some(e.to)
            } else if e.to == id {
                Some(e.from)
            } else {
                None
            }
        })
        .collect()
}

/// Suggestion to reuse evidence from a compliant requirement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvidenceReuse {
    /// Compliant requirement holding the evidence.
    pub source_id: String,
    /// Framework of the source.
    pub source_framework: Framework,
    /// Unassessed requirement the evidence may satisfy.
    pub target_id: String,
    /// Framework of the target.
    pub target_framework: Framework,
}

/// Suggest evidence reuse along cross-reference links.
///
/// For each link whose one end is `compliant` and whose other end is
/// `not_assessed` or missing, suggest reusing the evidence. Only frameworks
/// present in `statuses` are considered as targets. Output is sorted and
/// deduplicated.
pub fn suggest_evidence_reuse(statuses: &BTreeMap<Framework, StatusMap>) -> Vec<EvidenceReuse> {
    let framework_of: BTreeMap<String, Framework> = all_summaries()
        .into_iter()
        .map(|r| (r.id, r.framework))
        .collect();

    let status_in = |id: &str| -> Option<RequirementStatus> {
        let framework = framework_of.get(id)?;
        statuses.get(framework).map(|map| status_of(map, id))
    };

    let mut out: BTreeSet<EvidenceReuse> = BTreeSet::new();
    for e in cross_reference_graph() {
        for (source, target) in [(&e.from, &e.to), (&e.to, &e.from)] {
            let (Some(source_framework), Some(target_framework)) =
                (framework_of.get(source.as_str()), framework_of.get(target.as_str()))
            else {
                continue;
            };
            if status_in(source) == Some(RequirementStatus::Compliant)
                && status_in(target) == Some(RequirementStatus::NotAssessed)
            {
                out.insert(EvidenceReuse {
                    source_id: source.clone(),
                    source_framework: *source_framework,
                    target_id: target.clone(),
                    target_framework: *target_framework,
                });
            }
        }
    }
    out.into_iter().collect()
}

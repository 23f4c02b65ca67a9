//! # Incident Classification
//!
//! Rates an operational or security incident and lists the notifications it
//! triggers across regimes, each with a concrete deadline counted from
//! detection.
//!
//! | Severity    | Trigger                                                               |
//! |-------------|-----------------------------------------------------------------------|
//! | critical    | safety impact, collision, or fragmentation                            |
//! | major       | loss of control, ≥ 24 h downtime, ≥ €1M impact, or ≥ 100k users       |
//! | significant | ≥ 4 h downtime, ≥ €100k impact, ≥ 10k users, cross-border, or personal data |
//! | minor       | anything else                                                         |

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use orbit_core::{Deadline, DeadlineStatus, ValidationError};

use crate::nis2::{EntityClass, INCIDENT_TIMELINE};

const MAJOR_DOWNTIME_HOURS: f64 = 24.0;
const MAJOR_FINANCIAL_EUR: f64 = 1_000_000.0;
const MAJOR_USERS: u64 = 100_000;
const SIGNIFICANT_DOWNTIME_HOURS: f64 = 4.0;
const SIGNIFICANT_FINANCIAL_EUR: f64 = 100_000.0;
const SIGNIFICANT_USERS: u64 = 10_000;

/// Kind of incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentCategory {
    /// Unauthorised access to systems.
    CyberIntrusion,
    /// Disclosure or loss of data.
    DataBreach,
    /// Service unavailable.
    ServiceOutage,
    /// Spacecraft no longer commandable.
    LossOfControl,
    /// Collision with another object.
    Collision,
    /// Break-up of a spacecraft or stage.
    Fragmentation,
    /// Re-entry off the predicted corridor or timing.
    ReentryAnomaly,
    /// Harmful radio interference.
    HarmfulInterference,
    /// Ground station or mission control failure.
    GroundSegmentFailure,
}

impl IncidentCategory {
    fn is_space_safety_event(self) -> bool {
        matches!(
            self,
            Self::Collision | Self::Fragmentation | Self::LossOfControl | Self::ReentryAnomaly
        )
    }
}

/// Incident severity, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    /// Below every reporting threshold.
    Minor,
    /// Significant under NIS2 Art. 23(3).
    Significant,
    /// Major operational impact.
    Major,
    /// Safety impact or debris-generating event.
    Critical,
}

impl fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minor => write!(f, "minor"),
            Self::Significant => write!(f, "significant"),
            Self::Major => write!(f, "major"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Regime a notification is owed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationRegime {
    /// NIS2 Art. 23.
    Nis2,
    /// GDPR Art. 33.
    Gdpr,
    /// EU Space Act NCA notification.
    EuSpaceAct,
    /// ITU Art. 15 interference report via the administration.
    Itu,
}

/// Raw incident report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentReport {
    /// Kind of incident. Required.
    pub category: Option<IncidentCategory>,
    /// When the operator became aware of the incident. Required.
    pub detected_at: Option<DateTime<Utc>>,
    /// Service downtime, hours.
    pub service_downtime_hours: f64,
    /// Users affected.
    pub users_affected: u64,
    /// Direct financial impact, EUR.
    pub financial_impact_eur: f64,
    /// Affects more than one Member State.
    pub cross_border: bool,
    /// Personal data involved.
    pub personal_data_involved: bool,
    /// Risk to life or physical safety.
    pub safety_impact: bool,
    /// NIS2 class of the reporting entity, when known.
    pub nis2_entity: Option<EntityClass>,
}

/// A notification owed to an authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationObligation {
    /// Regime.
    pub regime: NotificationRegime,
    /// Recipient.
    pub authority: String,
    /// What is due and when.
    pub deadline: Deadline,
    /// Deadline status at classification time.
    pub status: DeadlineStatus,
}

/// Incident classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentClassification {
    /// Kind of incident.
    pub category: IncidentCategory,
    /// Severity.
    pub severity: IncidentSeverity,
    /// Thresholds that set the severity.
    pub reasons: Vec<String>,
    /// Significant incident for an in-scope NIS2 entity.
    pub nis2_significant: bool,
    /// Notifications owed, sorted by due time.
    pub notifications: Vec<NotificationObligation>,
}

/// Severity with the triggers that produced it.
pub fn incident_severity(
    category: IncidentCategory,
    report: &IncidentReport,
) -> (IncidentSeverity, Vec<String>) {
    let mut critical = Vec::new();
    if report.safety_impact {
        critical.push("risk to life or physical safety".to_string());
    }
    if matches!(category, IncidentCategory::Collision | IncidentCategory::Fragmentation) {
        critical.push("debris-generating event".to_string());
    }
    if !critical.is_empty() {
        return (IncidentSeverity::Critical, critical);
    }

    let mut major = Vec::new();
    if category == IncidentCategory::LossOfControl {
        major.push("loss of spacecraft control".to_string());
    }
    if report.service_downtime_hours >= MAJOR_DOWNTIME_HOURS {
        major.push(format!("downtime of {} h", report.service_downtime_hours));
    }
    if report.financial_impact_eur >= MAJOR_FINANCIAL_EUR {
        major.push(format!("financial impact of €{:.0}", report.financial_impact_eur));
    }
    if report.users_affected >= MAJOR_USERS {
        major.push(format!("{} users affected", report.users_affected));
    }
    if !major.is_empty() {
        return (IncidentSeverity::Major, major);
    }

    let mut significant = Vec::new();
    if report.service_downtime_hours >= SIGNIFICANT_DOWNTIME_HOURS {
        significant.push(format!("downtime of {} h", report.service_downtime_hours));
    }
    if report.financial_impact_eur >= SIGNIFICANT_FINANCIAL_EUR {
        significant.push(format!("financial impact of €{:.0}", report.financial_impact_eur));
    }
    if report.users_affected >= SIGNIFICANT_USERS {
        significant.push(format!("{} users affected", report.users_affected));
    }
    if report.cross_border {
        significant.push("cross-border impact".to_string());
    }
    if report.personal_data_involved {
        significant.push("personal data involved".to_string());
    }
    if !significant.is_empty() {
        return (IncidentSeverity::Significant, significant);
    }

    (IncidentSeverity::Minor, Vec::new())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: f64::MAX,
        });
    }
    Ok(())
}

/// Classify an incident and derive its notification obligations.
///
/// Deadline statuses are computed against `now` with a `due_soon` window.
pub fn classify_incident(
    report: &IncidentReport,
    now: DateTime<Utc>,
    due_soon: Duration,
) -> Result<IncidentClassification, ValidationError> {
    let category = report
        .category
        .ok_or(ValidationError::MissingField { field: "category" })?;
    let detected_at = report.detected_at.ok_or(ValidationError::MissingField {
        field: "detection time",
    })?;
    non_negative("service downtime", report.service_downtime_hours)?;
    non_negative("financial impact", report.financial_impact_eur)?;

    let (severity, reasons) = incident_severity(category, report);
    let nis2_significant = severity >= IncidentSeverity::Significant
        && report.nis2_entity.is_some_and(EntityClass::in_scope);

    let unrepresentable = || ValidationError::InvalidValue {
        field: "detection time",
        value: detected_at.to_rfc3339(),
        expected: "a time whose notification deadlines fall within the supported calendar range",
    };

    let mut owed: Vec<(NotificationRegime, &'static str, Deadline)> = Vec::new();
    if nis2_significant {
        let timeline = INCIDENT_TIMELINE
            .deadlines(detected_at)
            .ok_or_else(unrepresentable)?;
        for deadline in timeline {
            owed.push((NotificationRegime::Nis2, "CSIRT / NIS2 competent authority", deadline));
        }
    }
    if report.personal_data_involved {
        owed.push((
            NotificationRegime::Gdpr,
            "data protection supervisory authority",
            Deadline::after_hours("GDPR breach notification", detected_at, 72)
                .ok_or_else(unrepresentable)?,
        ));
    }
    if category.is_space_safety_event() {
        owed.push((
            NotificationRegime::EuSpaceAct,
            "national competent authority",
            Deadline::after_hours("EU Space Act NCA notification", detected_at, 24)
                .ok_or_else(unrepresentable)?,
        ));
    }
    if category == IncidentCategory::HarmfulInterference {
        owed.push((
            NotificationRegime::Itu,
            "notifying administration",
            Deadline::after_hours("ITU harmful interference report", detected_at, 24)
                .ok_or_else(unrepresentable)?,
        ));
    }

    owed.sort_by(|a, b| {
        a.2.due
            .cmp(&b.2.due)
            .then(a.0.cmp(&b.0))
            .then_with(|| a.2.label.cmp(&b.2.label))
    });
    owed.dedup_by(|a, b| a.0 == b.0 && a.2 == b.2);

    let notifications: Vec<NotificationObligation> = owed
        .into_iter()
        .map(|(regime, authority, deadline)| NotificationObligation {
            regime,
            authority: authority.to_string(),
            status: deadline.status(now, due_soon),
            deadline,
        })
        .collect();

    tracing::info!(
        category = ?category,
        severity = %severity,
        notifications = notifications.len(),
        "incident classified"
    );

    Ok(IncidentClassification {
        category,
        severity,
        reasons,
        nis2_significant,
        notifications,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap()
    }

    fn report(category: IncidentCategory) -> IncidentReport {
        IncidentReport {
            category: Some(category),
            detected_at: Some(at(10, 8)),
            ..Default::default()
        }
    }

    fn classify(r: &IncidentReport) -> IncidentClassification {
        classify_incident(r, at(10, 9), Duration::days(1)).unwrap()
    }

    #[test]
    fn severity_thresholds() {
        let mut r = report(IncidentCategory::ServiceOutage);
        assert_eq!(classify(&r).severity, IncidentSeverity::Minor);
        r.service_downtime_hours = 4.0;
        assert_eq!(classify(&r).severity, IncidentSeverity::Significant);
        r.service_downtime_hours = 24.0;
        assert_eq!(classify(&r).severity, IncidentSeverity::Major);
        r.safety_impact = true;
        assert_eq!(classify(&r).severity, IncidentSeverity::Critical);
    }

    #[test]
    fn users_and_money_thresholds() {
        let mut r = report(IncidentCategory::CyberIntrusion);
        r.users_affected = 9_999;
        assert_eq!(classify(&r).severity, IncidentSeverity::Minor);
        r.users_affected = 10_000;
        assert_eq!(classify(&r).severity, IncidentSeverity::Significant);
        r.users_affected = 0;
        r.financial_impact_eur = 1_000_000.0;
        assert_eq!(classify(&r).severity, IncidentSeverity::Major);
    }

    #[test]
    fn collision_is_critical_and_notifies_nca() {
        let c = classify(&report(IncidentCategory::Collision));
        assert_eq!(c.severity, IncidentSeverity::Critical);
        assert_eq!(c.notifications.len(), 1);
        assert_eq!(c.notifications[0].regime, NotificationRegime::EuSpaceAct);
        assert_eq!(c.notifications[0].deadline.due, at(11, 8));
        assert_eq!(c.notifications[0].status, DeadlineStatus::DueSoon);
    }

    #[test]
    fn nis2_requires_in_scope_entity() {
        let mut r = report(IncidentCategory::CyberIntrusion);
        r.cross_border = true;
        assert!(!classify(&r).nis2_significant);
        r.nis2_entity = Some(EntityClass::OutOfScope);
        assert!(!classify(&r).nis2_significant);
        r.nis2_entity = Some(EntityClass::Important);
        let c = classify(&r);
        assert!(c.nis2_significant);
        let labels: Vec<_> = c.notifications.iter().map(|n| n.deadline.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["NIS2 early warning", "NIS2 incident notification", "NIS2 final report"]
        );
        assert_eq!(c.notifications[2].deadline.due, Utc.with_ymd_and_hms(2026, 4, 13, 8, 0, 0).unwrap());
    }

    #[test]
    fn breach_with_personal_data_sorted_by_due() {
        let mut r = report(IncidentCategory::DataBreach);
        r.personal_data_involved = true;
        r.nis2_entity = Some(EntityClass::Essential);
        let c = classify(&r);
        let regimes: Vec<_> = c.notifications.iter().map(|n| n.regime).collect();
        assert_eq!(
            regimes,
            vec![
                NotificationRegime::Nis2,
                NotificationRegime::Nis2,
                NotificationRegime::Gdpr,
                NotificationRegime::Nis2,
            ]
        );
        assert!(c
            .notifications
            .windows(2)
            .all(|w| w[0].deadline.due <= w[1].deadline.due));
    }

    #[test]
    fn interference_goes_to_administration() {
        let c = classify(&report(IncidentCategory::HarmfulInterference));
        assert_eq!(c.notifications[0].regime, NotificationRegime::Itu);
    }

    #[test]
    fn overdue_status() {
        let r = report(IncidentCategory::Fragmentation);
        let c = classify_incident(&r, at(20, 0), Duration::days(1)).unwrap();
        assert_eq!(c.notifications[0].status, DeadlineStatus::Overdue);
    }

    #[test]
    fn missing_detection_time_rejected() {
        let mut r = report(IncidentCategory::Collision);
        r.detected_at = None;
        assert_eq!(
            classify_incident(&r, at(10, 9), Duration::days(1))
                .unwrap_err()
                .to_string(),
            "detection time is required"
        );
    }

    #[test]
    fn detection_near_calendar_end_is_rejected() {
        let latest = DateTime::<Utc>::MAX_UTC - Duration::hours(1);
        let r = IncidentReport {
            category: Some(IncidentCategory::CyberIntrusion),
            detected_at: Some(latest),
            safety_impact: true,
            personal_data_involved: true,
            nis2_entity: Some(EntityClass::Essential),
            ..Default::default()
        };
        let err = classify_incident(&r, at(10, 9), Duration::days(1)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue {
                field: "detection time",
                ..
            }
        ));

        // Minor incidents owe nothing, so no deadline is computed.
        let quiet = IncidentReport {
            category: Some(IncidentCategory::ServiceOutage),
            detected_at: Some(latest),
            ..Default::default()
        };
        let c = classify_incident(&quiet, at(10, 9), Duration::days(1)).unwrap();
        assert!(c.notifications.is_empty());
    }
}

//! # Temporal Types
//!
//! UTC-only timestamps and regulatory deadlines. Reporting clocks in the
//! covered frameworks run in hours (incident notification), months (final
//! reports) and years (ITU bringing-into-use), so [`Deadline`] offers a
//! constructor for each unit. Local time conversion is a presentation
//! concern handled by callers.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp.
///
/// Serializes as RFC 3339 with full sub-second precision. The canonical
/// string form ([`Timestamp::to_canonical_string`], `Display`) drops
/// fractional seconds: `2026-01-15T12:00:00Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// ISO 8601 string with `Z` suffix, truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

/// Where a deadline stands relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    /// More than the due-soon window away.
    Upcoming,
    /// Within the due-soon window.
    DueSoon,
    /// In the past.
    Overdue,
}

/// A labelled regulatory deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// What is due (e.g. "NIS2 early warning").
    pub label: String,
    /// When it is due.
    pub due: DateTime<Utc>,
}

impl Deadline {
    /// Deadline `hours` after `start`. `None` when the instant is not representable.
    pub fn after_hours(label: impl Into<String>, start: DateTime<Utc>, hours: i64) -> Option<Self> {
        Self::after(label, start, Duration::try_hours(hours)?)
    }

    /// Deadline `days` after `start`. `None` when the instant is not representable.
    pub fn after_days(label: impl Into<String>, start: DateTime<Utc>, days: i64) -> Option<Self> {
        Self::after(label, start, Duration::try_days(days)?)
    }

    fn after(label: impl Into<String>, start: DateTime<Utc>, delta: Duration) -> Option<Self> {
        Some(Self {
            label: label.into(),
            due: start.checked_add_signed(delta)?,
        })
    }

    /// Deadline `months` calendar months after `start`.
    ///
    /// Day-of-month is clamped to the end of the target month
    /// (31 January + 1 month = 28/29 February).
    pub fn after_months(label: impl Into<String>, start: DateTime<Utc>, months: u32) -> Option<Self> {
        Some(Self {
            label: label.into(),
            due: start.checked_add_months(Months::new(months))?,
        })
    }

    /// Deadline `years` calendar years after `start` (29 February clamps to 28 February).
    pub fn after_years(label: impl Into<String>, start: DateTime<Utc>, years: u32) -> Option<Self> {
        Self::after_months(label, start, years.checked_mul(12)?)
    }

    /// Classify the deadline relative to `now` with a due-soon window.
    pub fn status(&self, now: DateTime<Utc>, due_soon: Duration) -> DeadlineStatus {
        if self.due < now {
            DeadlineStatus::Overdue
        } else if self.due - now <= due_soon {
            DeadlineStatus::DueSoon
        } else {
            DeadlineStatus::Upcoming
        }
    }
}

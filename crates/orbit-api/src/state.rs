//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor. Assessments live in an in-memory [`Store`]; scores,
//! gaps, and recommendations are derived on every read and never stored.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use orbit_core::Framework;
use orbit_rules::StatusMap;

use crate::auth::SecretToken;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// The lock is `parking_lot`, never held across `.await`.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure runs under a single write lock. Returns `None` if the
    /// record doesn't exist, otherwise the closure's result.
    pub fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(id).map(f)
    }

    /// Remove a record by ID.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Records ------------------------------------------------------------------

/// A stored assessment: the questionnaire snapshot plus recorded statuses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssessmentRecord {
    pub id: Uuid,
    /// Operator the assessment belongs to.
    pub operator_id: String,
    #[schema(value_type = String, example = "nis2")]
    pub framework: Framework,
    /// Questionnaire answers as submitted. Validated at creation.
    #[schema(value_type = Object)]
    pub profile: serde_json::Value,
    /// Recorded statuses keyed by requirement id.
    #[schema(value_type = Object)]
    pub statuses: StatusMap,
    /// Free-text notes keyed by requirement id.
    pub notes: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Configuration --------------------------------------------------------------

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Shared bearer token. `None` disables authentication.
    pub auth_token: Option<SecretToken>,
    /// Window before a deadline in which it is reported as due soon.
    pub due_soon_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            due_soon_days: 30,
        }
    }
}

impl AppConfig {
    /// Read `PORT`, `AUTH_TOKEN`, and `DUE_SOON_DAYS` from the process
    /// environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to the defaults with a warning. An empty
    /// `AUTH_TOKEN` counts as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or_default(&lookup, "PORT", defaults.port);
        let due_soon_days = parse_or_default(&lookup, "DUE_SOON_DAYS", defaults.due_soon_days);
        let auth_token = lookup("AUTH_TOKEN")
            .filter(|t| !t.is_empty())
            .map(SecretToken::new);

        Self {
            port,
            auth_token,
            due_soon_days,
        }
    }

    /// The due-soon window as a duration.
    pub fn due_soon(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.due_soon_days))
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = key, value = %raw, fallback = %default, "unparseable setting, using default");
            default
        }),
    }
}

// -- AppState -------------------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub assessments: Store<AssessmentRecord>,
    pub config: AppConfig,
}

impl AppState {
    /// State with default configuration (auth disabled).
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            assessments: Store::new(),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

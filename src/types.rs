//! Core types and structures for domain-finder

use crate::config_error;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Maximum number of suggestions a check will produce
pub const MAX_SUGGESTIONS: usize = 10;

/// Domain availability outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Taken,
    /// The lookup could not be completed or interpreted.
    /// Carries an explanation for the primary domain only.
    Indeterminate(Option<String>),
}

impl Availability {
    /// Map a registry availability flag to an outcome
    pub fn from_available(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Taken
        }
    }

    /// Tri-state view: `Some(true)` available, `Some(false)` taken, `None` unknown
    pub fn as_option(&self) -> Option<bool> {
        match self {
            Self::Available => Some(true),
            Self::Taken => Some(false),
            Self::Indeterminate(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Indeterminate(_))
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Taken => write!(f, "taken"),
            Availability::Indeterminate(_) => write!(f, "unknown"),
        }
    }
}

/// Record returned by a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRecord {
    available: bool,
    server: Option<String>,
}

impl LookupRecord {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            server: None,
        }
    }

    /// Attach the name of the server that answered
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }
}

/// Outcome of a single check invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Normalized domain, or the raw input when it failed validation
    pub domain: String,
    /// Top-level message for validation or primary lookup failures
    pub error: Option<String>,
    /// Primary outcome; `None` when the input never reached a lookup
    pub outcome: Option<Availability>,
    /// Suggestions in generator order
    pub suggestions: Vec<String>,
    pub suggestion_results: BTreeMap<String, Availability>,
}

impl CheckResult {
    pub(crate) fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            error: None,
            outcome: None,
            suggestions: Vec::new(),
            suggestion_results: BTreeMap::new(),
        }
    }

    /// Tri-state availability of the primary domain
    pub fn available(&self) -> Option<bool> {
        self.outcome.as_ref().and_then(Availability::as_option)
    }

    /// Tri-state availability of one suggestion (`None` when unknown or absent)
    pub fn suggestion_available(&self, suggestion: &str) -> Option<bool> {
        self.suggestion_results
            .get(suggestion)
            .and_then(Availability::as_option)
    }

    /// Suggestions paired with their outcome, in generator order
    pub fn suggestion_outcomes(&self) -> impl Iterator<Item = (&str, &Availability)> {
        self.suggestions.iter().filter_map(move |name| {
            self.suggestion_results
                .get(name)
                .map(|outcome| (name.as_str(), outcome))
        })
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Wire representation handed to front ends
    pub fn to_response(&self) -> CheckResponse {
        CheckResponse {
            domain: self.domain.clone(),
            error: self.error.clone(),
            available: self.available(),
            suggestions: self.suggestions.clone(),
            suggestion_results: self
                .suggestion_results
                .iter()
                .map(|(name, outcome)| (name.clone(), outcome.as_option()))
                .collect(),
        }
    }
}

/// Serializable view of a [`CheckResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub domain: String,
    pub error: Option<String>,
    pub available: Option<bool>,
    pub suggestions: Vec<String>,
    pub suggestion_results: BTreeMap<String, Option<bool>>,
}

/// Configuration for availability checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub concurrent_lookups: usize,
    pub lookup_timeout: Duration,
    pub suggestion_limit: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrent_lookups: 5,
            lookup_timeout: Duration::from_secs(10),
            suggestion_limit: MAX_SUGGESTIONS,
        }
    }
}

impl CheckConfig {
    pub const ENV_CONCURRENCY: &'static str = "DOMAIN_FINDER_CONCURRENCY";
    pub const ENV_TIMEOUT_SECS: &'static str = "DOMAIN_FINDER_TIMEOUT_SECS";
    pub const ENV_SUGGESTION_LIMIT: &'static str = "DOMAIN_FINDER_SUGGESTION_LIMIT";

    /// Build a configuration from `DOMAIN_FINDER_*` environment variables,
    /// falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = get(Self::ENV_CONCURRENCY) {
            config = config.with_concurrency(parse_positive(Self::ENV_CONCURRENCY, &value)?);
        }
        if let Some(value) = get(Self::ENV_TIMEOUT_SECS) {
            let secs = parse_positive(Self::ENV_TIMEOUT_SECS, &value)?;
            config = config.with_timeout(Duration::from_secs(secs as u64));
        }
        if let Some(value) = get(Self::ENV_SUGGESTION_LIMIT) {
            config = config.with_suggestion_limit(parse_positive(Self::ENV_SUGGESTION_LIMIT, &value)?);
        }

        Ok(config)
    }

    /// Set the number of lookups allowed in flight (1-32)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrent_lookups = concurrency.clamp(1, 32);
        self
    }

    /// Set the timeout applied to every individual lookup
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout.max(Duration::from_millis(1));
        self
    }

    /// Cap the number of suggestions (never above ten)
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit.min(MAX_SUGGESTIONS);
        self
    }
}

fn parse_positive(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(config_error!("{} must be greater than zero", key)),
        Ok(n) => Ok(n),
        Err(e) => Err(config_error!("{} has invalid value '{}': {}", key, value, e)),
    }
}

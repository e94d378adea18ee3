//! Availability resolver: validates input, checks the domain and its suggestions

use crate::domain::{classify, DomainLookup, DomainValidator, SuggestionGenerator};
use crate::error::LookupError;
use crate::types::{Availability, CheckConfig, CheckResult, LookupRecord};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::time::timeout;

/// Resolves the availability of a domain and of the alternatives derived from it
pub struct AvailabilityResolver {
    config: CheckConfig,
    semaphore: Semaphore,
    lookup: Arc<dyn DomainLookup>,
    validator: DomainValidator,
    generator: SuggestionGenerator,
}

impl AvailabilityResolver {
    /// Create a resolver with default configuration
    pub fn new(lookup: Arc<dyn DomainLookup>) -> Self {
        Self::with_config(lookup, CheckConfig::default())
    }

    /// Create a resolver with custom configuration
    pub fn with_config(lookup: Arc<dyn DomainLookup>, config: CheckConfig) -> Self {
        let semaphore = Semaphore::new(config.concurrent_lookups.max(1));
        let generator = SuggestionGenerator::new().with_limit(config.suggestion_limit);

        Self {
            config,
            semaphore,
            lookup,
            validator: DomainValidator::new(),
            generator,
        }
    }

    /// Check a raw domain string.
    ///
    /// Never fails: validation and lookup problems are reported through
    /// [`CheckResult::error`]. Suggestions are only looked up when the primary
    /// lookup succeeded, and a failed suggestion lookup only marks that
    /// suggestion as unknown.
    pub async fn check(&self, raw: &str) -> CheckResult {
        let start_time = Instant::now();

        let domain = match self.validator.validate(raw) {
            Ok(domain) => domain,
            Err(e) => {
                tracing::debug!(input = %raw, error = ?e, "Domain rejected");
                let mut result = CheckResult::new(raw);
                result.error = Some(e.to_string());
                return result;
            }
        };

        let mut result = CheckResult::new(domain.as_str());

        match self.lookup_domain(domain.as_str()).await {
            Ok(record) => {
                result.outcome = Some(Availability::from_available(record.is_available()));
            }
            Err(e) => {
                let failure = classify(&e);
                let message = failure.user_message();

                tracing::warn!(
                    domain = %domain,
                    error = %e,
                    failure = ?failure,
                    "Primary lookup failed, skipping suggestions"
                );

                result.error = Some(message.clone());
                result.outcome = Some(Availability::Indeterminate(Some(message)));
                return result;
            }
        }

        result.suggestions = self.generator.generate(domain.as_str());
        result.suggestion_results = self.resolve_suggestions(&result.suggestions).await;

        let resolved = result
            .suggestion_results
            .values()
            .filter(|outcome| outcome.is_resolved())
            .count();

        tracing::info!(
            domain = %domain,
            status = ?result.outcome,
            suggestions = %result.suggestions.len(),
            suggestions_resolved = %resolved,
            duration_ms = %start_time.elapsed().as_millis(),
            "Domain check completed"
        );

        result
    }

    /// Get resolver configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Look up every suggestion concurrently; each future owns its own slot
    async fn resolve_suggestions(&self, suggestions: &[String]) -> BTreeMap<String, Availability> {
        let futures = suggestions.iter().map(|suggestion| async move {
            let outcome = match self.lookup_domain(suggestion).await {
                Ok(record) => Availability::from_available(record.is_available()),
                Err(e) => {
                    tracing::debug!(
                        suggestion = %suggestion,
                        failure = ?classify(&e),
                        "Suggestion lookup failed"
                    );
                    Availability::Indeterminate(None)
                }
            };
            (suggestion.clone(), outcome)
        });

        join_all(futures).await.into_iter().collect()
    }

    /// Single bounded, time-limited lookup
    async fn lookup_domain(&self, domain: &str) -> std::result::Result<LookupRecord, LookupError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| LookupError::other(format!("Failed to acquire lookup slot: {}", e)))?;

        let start_time = Instant::now();
        let limit = self.config.lookup_timeout;

        let result = timeout(limit, self.lookup.lookup(domain))
            .await
            .map_err(|_| LookupError::other(format!("lookup timed out after {:?}", limit)))?;

        tracing::debug!(
            domain = %domain,
            ok = result.is_ok(),
            server = ?result.as_ref().ok().and_then(LookupRecord::server),
            duration_ms = %start_time.elapsed().as_millis(),
            "Lookup finished"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Reports every domain available after a short delay, tracking parallelism
    struct SlowLookup {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl SlowLookup {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DomainLookup for SlowLookup {
        async fn lookup(&self, _domain: &str) -> std::result::Result<LookupRecord, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(LookupRecord::new(true))
        }
    }

    struct HangingSuggestions;

    #[async_trait]
    impl DomainLookup for HangingSuggestions {
        async fn lookup(&self, domain: &str) -> std::result::Result<LookupRecord, LookupError> {
            if domain != "example.com" {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok(LookupRecord::new(false))
        }
    }

    #[tokio::test]
    async fn test_parallelism_is_bounded() {
        let lookup = Arc::new(SlowLookup::new());
        let config = CheckConfig::default().with_concurrency(3);
        let resolver = AvailabilityResolver::with_config(lookup.clone(), config);

        let result = resolver.check("example.com").await;

        assert_eq!(result.suggestion_results.len(), 10);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 11);
        assert!(lookup.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_timeout_marks_suggestion_unknown() {
        let config = CheckConfig::default().with_timeout(Duration::from_millis(50));
        let resolver = AvailabilityResolver::with_config(Arc::new(HangingSuggestions), config);

        let result = resolver.check("example.com").await;

        assert_eq!(result.available(), Some(false));
        assert!(result.error.is_none());
        assert_eq!(result.suggestions.len(), 10);
        assert!(result
            .suggestion_results
            .values()
            .all(|outcome| *outcome == Availability::Indeterminate(None)));
    }

    #[tokio::test]
    async fn test_suggestion_limit_from_config() {
        let config = CheckConfig::default().with_suggestion_limit(3);
        let resolver = AvailabilityResolver::with_config(Arc::new(SlowLookup::new()), config);

        let result = resolver.check("example.com").await;
        assert_eq!(result.suggestions, vec!["getexample.com", "getexample.net", "getexample.org"]);
        assert_eq!(resolver.config().suggestion_limit, 3);
    }
}

//! Domain availability resolution module

pub mod classifier;
pub mod resolver;
pub mod suggestions;
pub mod validator;

// Re-export main functionality
pub use classifier::{classify, LookupFailure};
pub use resolver::AvailabilityResolver;
pub use suggestions::SuggestionGenerator;
pub use validator::{DomainValidator, NormalizedDomain};

use crate::error::LookupError;
use crate::types::LookupRecord;
use async_trait::async_trait;

/// Registry lookup capability consumed by the resolver
#[async_trait]
pub trait DomainLookup: Send + Sync {
    /// Look up registration data for a normalized domain
    async fn lookup(&self, domain: &str) -> std::result::Result<LookupRecord, LookupError>;
}

/// Top-level domains suggestions are generated for, in order
pub const SUGGESTION_TLDS: &[&str] = &["com", "net", "org"];

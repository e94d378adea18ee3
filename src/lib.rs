//! Domain Finder - domain availability checking with alternative suggestions
//!
//! Checks whether a domain is registered and, when the lookup succeeds, proposes
//! up to ten alternative names together with their availability.

pub mod domain;
pub mod error;
pub mod types;
#[cfg(feature = "whois")]
pub mod whois;

// Re-export commonly used types
pub use error::{DomainFinderError, LookupError, Result, ValidationError};
pub use types::{Availability, CheckConfig, CheckResponse, CheckResult, LookupRecord};

// Re-export main functionality
pub use domain::{AvailabilityResolver, DomainLookup};
#[cfg(feature = "whois")]
pub use whois::WhoisClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

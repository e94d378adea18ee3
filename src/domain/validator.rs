//! Domain name normalization and validation

use crate::error::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    /// One label of letters, digits or hyphens, a dot, then an alphabetic TLD.
    static ref DOMAIN_PATTERN: Regex = Regex::new(r"^[a-z0-9-]+\.[a-z]{2,}$").unwrap();
}

/// A trimmed, lower-cased domain that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedDomain(String);

impl NormalizedDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain name validator
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainValidator;

impl DomainValidator {
    /// Create a new domain validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a raw domain string.
    ///
    /// Names with more than one label before the TLD (`sub.example.com`) are
    /// rejected.
    pub fn validate(&self, raw: &str) -> Result<NormalizedDomain, ValidationError> {
        let domain = self.normalize(raw);

        if domain.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        if !DOMAIN_PATTERN.is_match(&domain) {
            return Err(ValidationError::InvalidFormat);
        }

        Ok(NormalizedDomain(domain))
    }

    /// Normalize domain name
    pub fn normalize(&self, raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Check whether the normalized form of `raw` matches the domain format
    pub fn is_valid_format(&self, raw: &str) -> bool {
        DOMAIN_PATTERN.is_match(&self.normalize(raw))
    }
}

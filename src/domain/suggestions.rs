//! Alternative domain name generation

use crate::domain::SUGGESTION_TLDS;
use crate::types::MAX_SUGGESTIONS;
use std::collections::HashSet;

/// How a naming pattern decorates the base label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePattern {
    Prefix(&'static str),
    Suffix(&'static str),
}

impl NamePattern {
    pub fn apply(&self, base: &str) -> String {
        match self {
            NamePattern::Prefix(prefix) => format!("{prefix}{base}"),
            NamePattern::Suffix(suffix) => format!("{base}{suffix}"),
        }
    }
}

/// Naming patterns, applied in order
pub const NAME_PATTERNS: &[NamePattern] = &[
    NamePattern::Prefix("get"),
    NamePattern::Suffix("app"),
    NamePattern::Suffix("hq"),
    NamePattern::Suffix("online"),
    NamePattern::Prefix("try"),
    NamePattern::Suffix("site"),
    NamePattern::Suffix("now"),
    NamePattern::Suffix("web"),
    NamePattern::Suffix("pro"),
];

/// Deterministic generator of alternative names for a domain
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    limit: usize,
}

impl SuggestionGenerator {
    pub fn new() -> Self {
        Self {
            limit: MAX_SUGGESTIONS,
        }
    }

    /// Produce at most `limit` suggestions (never more than ten)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_SUGGESTIONS);
        self
    }

    /// Label suggestions are built from: `www.` stripped, then the first label
    pub fn base_name(domain: &str) -> &str {
        let name = domain.strip_prefix("www.").unwrap_or(domain);
        match name.find('.') {
            Some(dot) => &name[..dot],
            None => name,
        }
    }

    /// Generate suggestions for `domain`.
    ///
    /// Candidates are pattern-major, TLD-minor; the domain itself and repeats
    /// are dropped before truncation.
    pub fn generate(&self, domain: &str) -> Vec<String> {
        let base = Self::base_name(domain);
        let mut seen = HashSet::new();

        NAME_PATTERNS
            .iter()
            .map(|pattern| pattern.apply(base))
            .flat_map(|name| {
                SUGGESTION_TLDS
                    .iter()
                    .map(move |tld| format!("{name}.{tld}"))
            })
            .filter(|candidate| candidate != domain)
            .filter(|candidate| seen.insert(candidate.clone()))
            .take(self.limit)
            .collect()
    }
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(SuggestionGenerator::base_name("example.com"), "example");
        assert_eq!(SuggestionGenerator::base_name("www.example.com"), "example");
        assert_eq!(SuggestionGenerator::base_name("www.com"), "com");
        assert_eq!(SuggestionGenerator::base_name("example"), "example");
        assert_eq!(SuggestionGenerator::base_name(""), "");
    }

    #[test]
    fn test_generation_order() {
        let suggestions = SuggestionGenerator::new().generate("example.com");

        assert_eq!(
            suggestions,
            vec![
                "getexample.com",
                "getexample.net",
                "getexample.org",
                "exampleapp.com",
                "exampleapp.net",
                "exampleapp.org",
                "examplehq.com",
                "examplehq.net",
                "examplehq.org",
                "exampleonline.com",
            ]
        );
    }

    #[test]
    fn test_never_contains_original() {
        for domain in ["example.com", "getfoo.net", "www.org", "a-b.io"] {
            let suggestions = SuggestionGenerator::new().generate(domain);
            assert!(!suggestions.iter().any(|s| s == domain), "{domain}");
            assert!(suggestions.len() <= MAX_SUGGESTIONS);

            let unique: HashSet<&String> = suggestions.iter().collect();
            assert_eq!(unique.len(), suggestions.len());
        }
    }

    #[test]
    fn test_empty_base_is_literal() {
        let suggestions = SuggestionGenerator::new().generate("");
        assert_eq!(&suggestions[..4], &["get.com", "get.net", "get.org", "app.com"]);
    }

    #[test]
    fn test_limit() {
        let suggestions = SuggestionGenerator::new().with_limit(4).generate("example.com");
        assert_eq!(suggestions.len(), 4);
        assert_eq!(suggestions[3], "exampleapp.com");

        let capped = SuggestionGenerator::new().with_limit(50).generate("example.com");
        assert_eq!(capped.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_deterministic() {
        let generator = SuggestionGenerator::new();
        assert_eq!(generator.generate("rust.dev"), generator.generate("rust.dev"));
    }
}

//! WHOIS lookup over TCP port 43.
//!
//! Known TLDs are queried against a fixed server; anything else is resolved
//! through IANA first.

use crate::domain::DomainLookup;
use crate::error::{LookupError, UNSUPPORTED_TARGET_MARKER};
use crate::types::LookupRecord;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const IANA_WHOIS_SERVER: &str = "whois.iana.org";

const AVAILABLE_PATTERNS: &[&str] = &[
    "no match",
    "not found",
    "no entries found",
    "domain not found",
    "domain available",
    "not registered",
    "available for registration",
];

const TAKEN_PATTERNS: &[&str] = &[
    "registrar:",
    "creation date:",
    "created:",
    "registered:",
    "name server:",
    "nameserver:",
    "domain status:",
];

type LookupResult<T> = std::result::Result<T, LookupError>;

/// WHOIS client implementing [`DomainLookup`]
#[derive(Debug, Clone)]
pub struct WhoisClient {
    io_timeout: Duration,
}

impl WhoisClient {
    pub fn new() -> Self {
        Self {
            io_timeout: Duration::from_secs(10),
        }
    }

    /// Timeout applied to connecting, writing and reading separately
    pub fn with_timeout(io_timeout: Duration) -> Self {
        Self { io_timeout }
    }

    /// Authoritative server for a TLD, when it is one we know
    pub fn whois_server_for_tld(tld: &str) -> Option<&'static str> {
        match tld {
            "com" | "net" => Some("whois.verisign-grs.com"),
            "org" => Some("whois.pir.org"),
            "io" => Some("whois.nic.io"),
            "ai" => Some("whois.nic.ai"),
            "co" => Some("whois.nic.co"),
            "me" => Some("whois.nic.me"),
            "xyz" => Some("whois.nic.xyz"),
            _ => None,
        }
    }

    async fn resolve_server(&self, tld: &str) -> LookupResult<String> {
        if let Some(server) = Self::whois_server_for_tld(tld) {
            return Ok(server.to_string());
        }

        let iana = self.query_whois(IANA_WHOIS_SERVER, tld).await?;
        Self::parse_iana_whois_server(&iana)
            .or_else(|| Self::parse_iana_refer_server(&iana))
            .ok_or_else(|| {
                LookupError::argument(format!(
                    "{}: no WHOIS server known for .{}",
                    UNSUPPORTED_TARGET_MARKER, tld
                ))
            })
    }

    /// Decide availability from a raw WHOIS response
    pub fn parse_availability(output: &str) -> Option<bool> {
        let output_lower = output.to_lowercase();

        let is_available = AVAILABLE_PATTERNS.iter().any(|pattern| output_lower.contains(pattern));
        let is_taken = TAKEN_PATTERNS.iter().any(|pattern| output_lower.contains(pattern));

        if is_taken {
            Some(false)
        } else if is_available {
            Some(true)
        } else {
            None
        }
    }

    async fn query_whois(&self, server: &str, query: &str) -> LookupResult<String> {
        let addr = format!("{}:43", server);
        let secs = self.io_timeout.as_secs();

        let mut stream = timeout(self.io_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| LookupError::other(format!("WHOIS connect to {} timed out after {}s", addr, secs)))?
            .map_err(|e| LookupError::other(format!("WHOIS connect to {} failed: {}", addr, e)))?;

        timeout(self.io_timeout, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| LookupError::other(format!("WHOIS write to {} timed out after {}s", addr, secs)))?
            .map_err(|e| LookupError::other(format!("WHOIS write to {} failed: {}", addr, e)))?;

        let mut buf = Vec::new();
        timeout(self.io_timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| LookupError::other(format!("WHOIS read from {} timed out after {}s", addr, secs)))?
            .map_err(|e| LookupError::other(format!("WHOIS read from {} failed: {}", addr, e)))?;

        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    fn parse_iana_whois_server(iana: &str) -> Option<String> {
        Self::parse_iana_field(iana, "whois:")
    }

    fn parse_iana_refer_server(iana: &str) -> Option<String> {
        Self::parse_iana_field(iana, "refer:")
    }

    fn parse_iana_field(iana: &str, field: &str) -> Option<String> {
        iana.lines()
            .map(str::trim)
            .find_map(|line| {
                if line.to_lowercase().starts_with(field) {
                    Some(line.splitn(2, ':').nth(1)?.trim().to_string())
                } else {
                    None
                }
            })
            .filter(|s| !s.is_empty())
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> LookupResult<LookupRecord> {
        let tld = domain
            .rsplit('.')
            .next()
            .filter(|tld| !tld.is_empty() && *tld != domain)
            .ok_or_else(|| LookupError::argument(format!("'{}' has no top-level domain", domain)))?;

        let server = self.resolve_server(tld).await?;
        let raw = self.query_whois(&server, domain).await?;

        tracing::debug!(domain = %domain, server = %server, bytes = raw.len(), "WHOIS response received");

        match Self::parse_availability(&raw) {
            Some(available) => Ok(LookupRecord::new(available).with_server(server)),
            None => Err(LookupError::other(format!(
                "unrecognized WHOIS response from {}",
                server
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify;
    use crate::domain::LookupFailure;

    #[test]
    fn test_iana_whois_parsing() {
        let sample = r#"
domain:       COM
organisation: Verisign Global Registry Services
whois:        whois.verisign-grs.com
status:       ACTIVE
"#;
        assert_eq!(
            WhoisClient::parse_iana_whois_server(sample).as_deref(),
            Some("whois.verisign-grs.com")
        );
    }

    #[test]
    fn test_iana_refer_parsing() {
        let sample = "refer: whois.nic.io\n";
        assert_eq!(WhoisClient::parse_iana_refer_server(sample).as_deref(), Some("whois.nic.io"));
        assert_eq!(WhoisClient::parse_iana_whois_server(sample), None);
    }

    #[test]
    fn test_iana_empty_field_ignored() {
        let sample = "whois:\nrefer:   \n";
        assert_eq!(WhoisClient::parse_iana_whois_server(sample), None);
        assert_eq!(WhoisClient::parse_iana_refer_server(sample), None);
    }

    #[test]
    fn test_parse_availability() {
        let available = "No match for \"GETEXAMPLE.COM\".\r\n>>> Last update of whois database";
        assert_eq!(WhoisClient::parse_availability(available), Some(true));

        let taken = "   Domain Name: EXAMPLE.COM\r\n   Registrar: RESERVED-Internet Assigned Numbers Authority\r\n   Creation Date: 1995-08-14T04:00:00Z";
        assert_eq!(WhoisClient::parse_availability(taken), Some(false));

        assert_eq!(WhoisClient::parse_availability("rate limit exceeded"), None);
    }

    #[test]
    fn test_known_servers() {
        assert_eq!(WhoisClient::whois_server_for_tld("com"), Some("whois.verisign-grs.com"));
        assert_eq!(WhoisClient::whois_server_for_tld("org"), Some("whois.pir.org"));
        assert_eq!(WhoisClient::whois_server_for_tld("tld"), None);
    }

    #[test]
    fn test_domain_without_tld_is_argument_error() {
        let err = tokio_test::block_on(WhoisClient::new().lookup("localhost")).unwrap_err();
        assert!(err.is_argument());
        assert!(matches!(classify(&err), LookupFailure::Failed(_)));
    }
}

//! Error handling for domain-finder

use thiserror::Error;

/// Marker the lookup collaborator puts in an argument error when it cannot
/// build a lookup strategy for the target's registry.
pub const UNSUPPORTED_TARGET_MARKER: &str = "undefined group name reference";

/// Main error type for everything around a check (configuration, I/O, CLI)
#[derive(Error, Debug, Clone)]
pub enum DomainFinderError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl DomainFinderError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with a hint
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or DOMAIN_FINDER_* variables", message)
            }
            Self::Serialization { message } => {
                format!("❌ Could not render result: {}", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}", path_info, message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
        }
    }
}

/// Rejection of a raw domain string.
///
/// The `Display` output is the message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a domain name.")]
    EmptyInput,

    #[error("Invalid domain format. Please enter a domain like example.com.")]
    InvalidFormat,
}

/// Error raised by a lookup collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The collaborator could not construct a lookup for this target
    #[error("{message}")]
    Argument { message: String },

    /// Any other failure (network, timeout, unreadable response)
    #[error("{message}")]
    Other { message: String },
}

impl LookupError {
    /// Create an argument/format error
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Create an error of any other kind
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Message text carried by the error
    pub fn message(&self) -> &str {
        match self {
            Self::Argument { message } | Self::Other { message } => message,
        }
    }

    /// Whether the error is of the argument/format kind
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }
}

impl From<serde_json::Error> for DomainFinderError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<std::io::Error> for DomainFinderError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<inquire::InquireError> for DomainFinderError {
    fn from(err: inquire::InquireError) -> Self {
        Self::cli(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainFinderError>;

/// Helper macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::DomainFinderError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainFinderError::config(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyInput.to_string(), "Please enter a domain name.");
        assert_eq!(
            ValidationError::InvalidFormat.to_string(),
            "Invalid domain format. Please enter a domain like example.com."
        );
    }

    #[test]
    fn test_lookup_error_accessors() {
        let err = LookupError::argument("bad pattern");
        assert!(err.is_argument());
        assert_eq!(err.message(), "bad pattern");
        assert_eq!(err.to_string(), "bad pattern");

        let err = LookupError::other("connection refused");
        assert!(!err.is_argument());
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn test_config_error_macro() {
        let err = config_error!("bad value {}", 42);
        assert!(err.to_string().contains("bad value 42"));
        assert!(err.user_message().contains("DOMAIN_FINDER_"));
    }
}

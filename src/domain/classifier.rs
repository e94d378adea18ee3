//! Classification of lookup collaborator errors

use crate::error::{LookupError, UNSUPPORTED_TARGET_MARKER};

/// Why a lookup produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The collaborator has no support for this target's WHOIS server
    UnsupportedTarget,
    /// The lookup failed; carries the collaborator's message
    Failed(String),
}

impl LookupFailure {
    /// Message reported when the primary lookup fails
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedTarget => "Sorry, this domain's WHOIS server is not supported.".to_string(),
            Self::Failed(message) => format!("Error checking domain: {}", message),
        }
    }
}

/// Map a lookup error to a failure kind
pub fn classify(error: &LookupError) -> LookupFailure {
    match error {
        LookupError::Argument { message } if message.contains(UNSUPPORTED_TARGET_MARKER) => {
            LookupFailure::UnsupportedTarget
        }
        LookupError::Argument { message } | LookupError::Other { message } => {
            LookupFailure::Failed(message.clone())
        }
    }
}

//! Transport errors

use thiserror::Error;

/// Errors raised by [`ApiClient`](super::ApiClient)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// HTTP client could not be built
    #[error("Initialization error: {0}")]
    Init(String),

    /// Connection, DNS or timeout failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP error ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// 2xx response whose envelope reported `success: false`
    #[error("Request rejected: {message}")]
    Rejected {
        message: String,
        code: Option<String>,
    },

    /// Body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Body decoded but lacked required content
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the server
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } | Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Structured error code supplied by the server
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Http { code, .. } | Self::Rejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether retrying the same request may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Init(err.to_string())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

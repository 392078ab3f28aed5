//! Unified error handling for the roomdesk crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`RoomdeskErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Version conflicts on room status updates are not errors; they are returned
//! as [`RoomStatusConflict`](crate::room_status::RoomStatusConflict) values.

use thiserror::Error;

pub use crate::auth::AuthError;
pub use crate::config::ConfigError;
pub use crate::room_status::RoomStatusError;
pub use crate::transport::TransportError;

/// Common trait for all roomdesk error types
pub trait RoomdeskErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection failures and non-2xx answers
    Network,
    /// Response bodies that could not be decoded
    Parsing,
    /// Client-side validation (unknown status, disallowed transition)
    Validation,
    /// Missing session or insufficient permissions
    Auth,
    /// Configuration errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short label for logs and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Validation => "validation",
            Self::Auth => "auth",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl RoomdeskErrorTrait for TransportError {
    fn is_recoverable(&self) -> bool {
        TransportError::is_recoverable(self)
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) | Self::InvalidResponse(_) => ErrorCategory::Parsing,
            Self::Init(_) => ErrorCategory::Config,
            Self::Http { status, .. } if *status == 401 || *status == 403 => ErrorCategory::Auth,
            Self::Network(_) | Self::Http { .. } | Self::Rejected { .. } => ErrorCategory::Network,
        }
    }
}

impl RoomdeskErrorTrait for RoomStatusError {
    fn is_recoverable(&self) -> bool {
        RoomStatusError::is_recoverable(self)
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownStatus(_) | Self::InvalidTransition { .. } => ErrorCategory::Validation,
            Self::Transport(e) => e.category(),
        }
    }
}

impl RoomdeskErrorTrait for AuthError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Auth
    }
}

impl RoomdeskErrorTrait for ConfigError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Config
    }
}

/// Unified error type for the roomdesk crate
#[derive(Error, Debug)]
pub enum Error {
    /// Transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Room status errors
    #[error("Room status error: {0}")]
    RoomStatus(#[from] RoomStatusError),

    /// Permission gate errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl RoomdeskErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_recoverable(),
            Self::RoomStatus(e) => e.is_recoverable(),
            Self::Auth(e) => e.is_recoverable(),
            Self::Config(e) => e.is_recoverable(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(e) => e.category(),
            Self::RoomStatus(e) => e.category(),
            Self::Auth(e) => e.category(),
            Self::Config(e) => e.category(),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Category of the first roomdesk error found in an `anyhow` cause chain
///
/// Errors that did not originate in this crate are [`ErrorCategory::Other`].
pub fn category_of(err: &anyhow::Error) -> ErrorCategory {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<Error>() {
            return e.category();
        }
        if let Some(e) = cause.downcast_ref::<RoomStatusError>() {
            return e.category();
        }
        if let Some(e) = cause.downcast_ref::<TransportError>() {
            return e.category();
        }
        if let Some(e) = cause.downcast_ref::<AuthError>() {
            return e.category();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.category();
        }
    }
    ErrorCategory::Other
}

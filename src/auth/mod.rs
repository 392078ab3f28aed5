//! Session state and permission gates
//!
//! Permission checks go through a [`Capabilities`] set. The ADMIN role is
//! granted the universal set, so call sites never special-case
//! administrators.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Role whose holders pass every permission check
pub const ADMIN_ROLE: &str = "ADMIN";

// ============================================================================
// Errors
// ============================================================================

/// Permission gate failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No session is active
    #[error("Not logged in")]
    Unauthenticated,

    /// The session lacks a permission
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The session lacks a role
    #[error("Role required: {0}")]
    RoleRequired(String),
}

// ============================================================================
// Capabilities
// ============================================================================

/// Set of permission codes a session may exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capabilities {
    /// Every permission, present or future
    All,

    /// Exactly the listed permission codes
    Granted(HashSet<String>),
}

impl Capabilities {
    /// Build the set for a role and its explicit permission list
    pub fn for_role<I, S>(role: &str, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if role == ADMIN_ROLE {
            Self::All
        } else {
            Self::Granted(permissions.into_iter().map(Into::into).collect())
        }
    }

    /// Whether `code` is in the set
    pub fn contains(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Granted(codes) => codes.contains(code),
        }
    }

    /// Union of two sets
    pub fn union(self, other: Capabilities) -> Capabilities {
        match (self, other) {
            (Self::All, _) | (_, Self::All) => Self::All,
            (Self::Granted(mut a), Self::Granted(b)) => {
                a.extend(b);
                Self::Granted(a)
            }
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Logged-in user as returned by the platform's login endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub role: String,

    #[serde(default)]
    pub permissions: Vec<String>,

    pub token: String,
}

impl Session {
    /// Capability set derived from role and permission list
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(&self.role, self.permissions.iter().cloned())
    }

    /// Whether the session may exercise `code`
    pub fn has_permission(&self, code: &str) -> bool {
        self.capabilities().contains(code)
    }

    /// Exact role match
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Whether the session holds the ADMIN role
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

// ============================================================================
// Auth Store
// ============================================================================

/// Holds the current session for permission gates and route guards
#[derive(Debug, Default)]
pub struct AuthStore {
    session: Option<Session>,
    capabilities: Option<Capabilities>,
}

impl AuthStore {
    /// Create an empty (logged out) store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session
    pub fn login(&mut self, session: Session) {
        tracing::info!(user_id = session.user_id, role = %session.role, "Session started");
        self.capabilities = Some(session.capabilities());
        self.session = Some(session);
    }

    /// Clear the session
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = session.user_id, "Session ended");
        }
        self.capabilities = None;
    }

    /// Current session
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Bearer token of the current session
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Whether a session is active
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the session may exercise `code`; false when logged out
    pub fn has_permission(&self, code: &str) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.contains(code))
    }

    /// Whether the session may exercise at least one of `codes`
    pub fn has_any_permission(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.has_permission(code))
    }

    /// Whether the session may exercise every one of `codes`
    pub fn has_all_permissions(&self, codes: &[&str]) -> bool {
        self.is_authenticated() && codes.iter().all(|code| self.has_permission(code))
    }

    /// Exact role match; false when logged out
    pub fn has_role(&self, role: &str) -> bool {
        self.session.as_ref().is_some_and(|s| s.has_role(role))
    }

    /// Whether the session holds the ADMIN role
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// Guard: fail unless the session may exercise `code`
    pub fn require_permission(&self, code: &str) -> Result<(), AuthError> {
        if !self.is_authenticated() {
            return Err(AuthError::Unauthenticated);
        }

        if self.has_permission(code) {
            Ok(())
        } else {
            tracing::warn!(permission = code, "Permission check failed");
            Err(AuthError::PermissionDenied(code.to_string()))
        }
    }

    /// Guard: fail unless the session holds `role`
    pub fn require_role(&self, role: &str) -> Result<(), AuthError> {
        if !self.is_authenticated() {
            return Err(AuthError::Unauthenticated);
        }

        if self.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::RoleRequired(role.to_string()))
        }
    }
}

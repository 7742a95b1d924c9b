//! Login Attempt Entity
//!
//! An immutable record of one login attempt. Attempts are appended to the
//! ledger and never mutated or deleted; they are the evidentiary basis for
//! ban decisions.

use chrono::{DateTime, Utc};

/// One login attempt, successful or not
///
/// Attempts key off `(identity, origin)` rather than a user id so that
/// attempts against identities that never resolve to a real user still
/// accumulate toward a ban.
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    /// Username or email exactly as supplied by the caller
    pub identity: String,
    /// Network origin of the attempt (source IP or "unknown")
    pub origin: String,
    /// Whether the attempt authenticated successfully
    pub succeeded: bool,
    /// When the attempt happened
    pub attempted_at: DateTime<Utc>,
    /// Opaque client agent string (User-Agent)
    pub client_agent: Option<String>,
}

impl LoginAttempt {
    /// Record a failed attempt
    pub fn failure(
        identity: impl Into<String>,
        origin: impl Into<String>,
        client_agent: Option<String>,
        attempted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: identity.into(),
            origin: origin.into(),
            succeeded: false,
            attempted_at,
            client_agent,
        }
    }

    /// Record a successful attempt
    pub fn success(
        identity: impl Into<String>,
        origin: impl Into<String>,
        client_agent: Option<String>,
        attempted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: identity.into(),
            origin: origin.into(),
            succeeded: true,
            attempted_at,
            client_agent,
        }
    }
}

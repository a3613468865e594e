use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session handed back by the payment processor's authentication step.
///
/// An explicit value passed to the calls that need it; expiry is a pure
/// function of the instant the caller supplies, never of a hidden clock.
/// Attempt-scoped: a fresh session is obtained for every attempt and
/// never reused across attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: Some(expires_at),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// A session without an expiry never expires.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}

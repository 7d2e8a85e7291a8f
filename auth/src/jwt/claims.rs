use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried inside a bearer token.
///
/// Strongly typed: a token whose payload is missing any field, carries a
/// wrong type, or carries unrecognized fields fails decoding instead of being
/// optimistically accepted. Immutable once issued; altering any field
/// invalidates the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject: the identity's unique id.
    pub sub: i64,

    /// Username of the subject at issuance time.
    pub username: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject, expiring `lifetime` from now.
    pub fn issued_now(sub: i64, username: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub,
            username: username.into(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Whether the token is expired at `current_timestamp`.
    ///
    /// A token is valid strictly before its expiry and invalid at or after it.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

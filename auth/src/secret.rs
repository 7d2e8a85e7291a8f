use std::fmt;

use chrono::Duration;
use thiserror::Error;

/// Process-wide signing configuration.
///
/// Holds the token signing secret and the fixed token lifetime. Built once at
/// startup from deployment configuration and passed explicitly to
/// [`TokenIssuer`](crate::TokenIssuer) and
/// [`TokenValidator`](crate::TokenValidator); never a hidden global.
#[derive(Clone)]
pub struct SecretConfig {
    secret: String,
    token_lifetime: Duration,
}

/// Error type for signing configuration construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretConfigError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime must be positive, got {0} minutes")]
    InvalidLifetime(i64),
}

impl SecretConfig {
    /// Default token lifetime in minutes.
    pub const DEFAULT_LIFETIME_MINUTES: i64 = 30;

    /// Build the signing configuration.
    ///
    /// # Arguments
    /// * `secret` - Signing secret from deployment configuration
    /// * `lifetime_minutes` - Token lifetime in minutes
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is missing or empty
    /// * `InvalidLifetime` - Lifetime is zero or negative
    pub fn new(secret: impl Into<String>, lifetime_minutes: i64) -> Result<Self, SecretConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SecretConfigError::EmptySecret);
        }
        if lifetime_minutes <= 0 {
            return Err(SecretConfigError::InvalidLifetime(lifetime_minutes));
        }

        Ok(Self {
            secret,
            token_lifetime: Duration::minutes(lifetime_minutes),
        })
    }

    /// Signing secret as raw bytes.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Fixed token lifetime.
    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }
}

// The secret must never end up in logs.
impl fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretConfig")
            .field("secret", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .finish()
    }
}

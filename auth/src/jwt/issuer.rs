use chrono::Duration;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::AuthError;
use crate::secret::SecretConfig;

/// The one algorithm tokens are ever signed with. The issuer always emits
/// this tag and the validator accepts nothing else.
pub(crate) const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;
pub(crate) const TOKEN_ALGORITHM_NAME: &str = "HS256";

/// Signs claims into bearer tokens.
///
/// Holds only the immutable encoding key and the fixed token lifetime, so a
/// single instance is safely shared across request tasks.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the process signing configuration.
    pub fn new(config: &SecretConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
            lifetime: config.token_lifetime(),
        }
    }

    /// Issue a signed token for an identity.
    ///
    /// Claims are `{sub, username, iat: now, exp: now + lifetime}`. The token
    /// is not extendable and there is no refresh mechanism.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, subject_id: i64, username: &str) -> Result<String, AuthError> {
        let claims = Claims::issued_now(subject_id, username, self.lifetime);
        self.issue_claims(&claims)
    }

    /// Sign a prepared claims set.
    pub fn issue_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = Header::new(TOKEN_ALGORITHM);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AuthError::EncodingFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        let config = SecretConfig::new("test_secret_key_at_least_32_bytes!", 30).unwrap();
        TokenIssuer::new(&config)
    }

    #[test]
    fn test_issue_produces_compact_token() {
        let token = issuer().issue(42, "alice").expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_issued_header_declares_hs256() {
        let token = issuer().issue(42, "alice").expect("Failed to issue token");

        let header = jsonwebtoken::decode_header(&token).expect("Failed to decode header");
        assert_eq!(header.alg, Algorithm::HS256);
    }
}

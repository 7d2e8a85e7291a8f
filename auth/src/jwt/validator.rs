use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::AuthError;
use super::issuer::TOKEN_ALGORITHM;
use super::issuer::TOKEN_ALGORITHM_NAME;
use crate::secret::SecretConfig;

/// Verifies bearer tokens and produces validated claims.
///
/// Validation is pure and reentrant; the only shared state is the read-only
/// decoding key. Each check rejects with its own [`AuthError`] variant:
///
/// 1. structural shape -> `Malformed`
/// 2. declared algorithm -> `UnsupportedAlgorithm`
/// 3. signature -> `InvalidSignature`
/// 4. claims shape -> `MalformedClaims`
/// 5. expiry -> `Expired`
///
/// The algorithm is read from the raw header segment before any signature
/// work, so a header declaring `"none"` (or anything other than HS256) is
/// rejected outright rather than being trusted. Accepting an
/// attacker-selected algorithm is a known token-forgery class.
pub struct TokenValidator {
    decoding_key: DecodingKey,
}

/// The raw token header, decoded only far enough to read the algorithm tag.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl TokenValidator {
    /// Create a validator from the process signing configuration.
    pub fn new(config: &SecretConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
        }
    }

    /// Validate a token string and return its claims.
    ///
    /// # Errors
    /// One [`AuthError`] variant per rejected validation step; see the type
    /// docs for the order of checks.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let algorithm = declared_algorithm(token)?;
        if algorithm != TOKEN_ALGORITHM_NAME {
            return Err(AuthError::UnsupportedAlgorithm(algorithm));
        }

        // Expiry is checked by hand below: the library treats a token as live
        // at the exact expiry instant, while the contract here is strict.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                        AuthError::MalformedClaims
                    }
                    _ => AuthError::Malformed,
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

/// Read the algorithm the token header declares.
///
/// Rejects anything that is not a three-segment compact token with a
/// base64url JSON header.
fn declared_algorithm(token: &str) -> Result<String, AuthError> {
    let mut segments = token.split('.');
    let header = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(_), Some(_), None) => header,
        _ => return Err(AuthError::Malformed),
    };

    let decoded = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::Malformed)?;
    let raw: RawHeader = serde_json::from_slice(&decoded).map_err(|_| AuthError::Malformed)?;

    Ok(raw.alg)
}

use crate::jwt::AuthError;
use crate::jwt::Claims;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::SecretConfig;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Owns the only pieces of state the auth layer carries across requests: the
/// immutable signing keys and the hasher. Safe to share behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] AuthError),
}

impl Authenticator {
    /// Create a new authenticator from the process signing configuration.
    pub fn new(config: &SecretConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(config),
            token_validator: TokenValidator::new(config),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a bearer token for the identity.
    ///
    /// The plaintext password is used only for the comparison and dropped
    /// immediately after.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `TokenError` - Token issuance failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject_id: i64,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(subject_id, username)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Validate and decode a bearer token.
    ///
    /// # Errors
    /// * `AuthError` - One variant per rejected validation step
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.token_validator.validate(token)
    }
}

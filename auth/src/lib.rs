//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the portfolio service:
//! - Password hashing (Argon2id)
//! - Stateless bearer token issuance and validation (HS256 JWT)
//! - Authentication coordination
//!
//! The signing secret and token lifetime live in a single immutable
//! [`SecretConfig`] constructed at process start and passed explicitly to the
//! issuer and validator. There is no hidden global state.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SecretConfig};
//!
//! let secret = SecretConfig::new("secret_key_at_least_32_bytes_long!", 30).unwrap();
//! let auth = Authenticator::new(&secret);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 1, "alice").unwrap();
//!
//! // Validate token on a later request
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, 1);
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::AuthError;
pub use jwt::Claims;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SecretConfig;
pub use secret::SecretConfigError;

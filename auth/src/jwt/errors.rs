use thiserror::Error;

/// Error type for token operations.
///
/// Each validation step has its own rejection variant so the request boundary
/// can log precisely why a token was refused. All variants map to 401 except
/// `EncodingFailed`, which is an internal issuance failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Token is not a three-segment compact JWS with a decodable header.
    #[error("Token is malformed")]
    Malformed,

    /// Header declares an algorithm other than the one fixed algorithm the
    /// issuer uses, including an explicit "none".
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match header and payload under the process secret.
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// Token expiry has passed.
    #[error("Token is expired")]
    Expired,

    /// Payload decoded but does not match the expected claims shape.
    #[error("Token claims are malformed")]
    MalformedClaims,

    /// Request carries no Authorization header.
    #[error("Authorization header is required")]
    MissingHeader,

    /// Authorization header does not use the Bearer scheme.
    #[error("Authorization header must use the Bearer scheme")]
    MissingScheme,

    /// Token issuance failed.
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

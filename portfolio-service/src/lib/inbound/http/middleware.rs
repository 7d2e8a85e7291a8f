use auth::AuthError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Authenticated identity bound to the request scope.
///
/// Inserted into request extensions only after successful token validation,
/// so a handler failing to extract it is a programming error (axum's
/// `Extension` extractor turns that into a 500).
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Request-boundary binder: extracts the bearer token, validates it, and
/// binds the resulting identity to the request.
///
/// On any failure the request is rejected with 401 and no handler downstream
/// of this middleware runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).map_err(|e| {
        tracing::warn!(error = %e, "Rejected request without usable bearer token");
        ApiError::Unauthorized(e.to_string()).into_response()
    })?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.sub),
        username: claims.username,
    });

    Ok(next.run(req).await)
}

/// Pull the token out of the Authorization header.
///
/// Distinguishes a missing header from a wrong scheme; the `"Bearer "` prefix
/// match is exact and case-sensitive.
fn extract_bearer_token(req: &Request) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MissingScheme)?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingScheme)
}

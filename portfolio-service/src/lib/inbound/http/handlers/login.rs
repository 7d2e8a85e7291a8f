use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // Any credential problem collapses into one 401 so the response does not
    // reveal whether the username exists.
    let invalid_credentials =
        || ApiError::Unauthorized("Invalid username or password".to_string());

    let username = Username::new(body.username).map_err(|_| invalid_credentials())?;

    let user = state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByUsername(_) => invalid_credentials(),
            _ => ApiError::from(e),
        })?;

    let result = state
        .authenticator
        .authenticate(
            &body.password,
            &user.password_hash,
            user.id.0,
            user.username.as_str(),
        )
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => invalid_credentials(),
            auth::AuthenticationError::PasswordError(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            auth::AuthenticationError::TokenError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: result.access_token,
            user_id: user.id.0,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user_id: i64,
}

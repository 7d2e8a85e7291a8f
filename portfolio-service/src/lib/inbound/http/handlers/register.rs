use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .register_user(command)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                RegisterResponseData {
                    message: "User registered successfully".to_string(),
                },
            )
        })
}

/// HTTP request body for registration (raw JSON).
///
/// Fields default to empty so that a missing field reports the same 400 as an
/// empty one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let username = Username::new(self.username)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if self.password.is_empty() {
            return Err(ApiError::BadRequest("Password is required".to_string()));
        }

        Ok(RegisterUserCommand::new(username, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_asset::AssetResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::asset::models::CreateAssetCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_asset(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Json(body): Json<AddAssetRequest>,
) -> Result<ApiSuccess<AssetResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .asset_service
        .add_asset(identity.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref asset| ApiSuccess::new(StatusCode::OK, asset.into()))
}

/// HTTP request body for asset creation (raw JSON).
///
/// Any caller-supplied price is ignored; the price comes from the external
/// lookup. The `user_id` is the owner the caller intends to stamp and must
/// match the authenticated identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddAssetRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    amount: f64,
    user_id: Option<i64>,
}

impl AddAssetRequest {
    fn try_into_command(self) -> Result<CreateAssetCommand, ApiError> {
        let claimed_owner = self
            .user_id
            .ok_or_else(|| ApiError::BadRequest("user_id is required".to_string()))?;

        CreateAssetCommand::new(self.name, self.amount, UserId(claimed_owner))
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_asset::AssetResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::asset::models::AssetId;
use crate::asset::models::UpdateAssetCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_asset(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateAssetRequest>,
) -> Result<ApiSuccess<AssetResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .asset_service
        .update_asset(identity.user_id, AssetId(id), command)
        .await
        .map_err(ApiError::from)
        .map(|ref asset| ApiSuccess::new(StatusCode::OK, asset.into()))
}

/// HTTP request body for asset updates (raw JSON).
///
/// All fields are optional; only `amount` and `price` are applied, and a
/// `name` differing from the stored one is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub price: Option<f64>,
}

impl UpdateAssetRequest {
    fn try_into_command(self) -> Result<UpdateAssetCommand, ApiError> {
        UpdateAssetCommand::new(self.name, self.amount, self.price)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

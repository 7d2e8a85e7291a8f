use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::asset::models::AssetId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_asset(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<DeleteAssetResponseData>, ApiError> {
    state
        .asset_service
        .delete_asset(identity.user_id, AssetId(id))
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteAssetResponseData {
                    message: "Asset deleted".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAssetResponseData {
    pub message: String,
}

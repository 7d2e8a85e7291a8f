use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::asset::models::Asset;
use crate::asset::models::AssetId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_asset(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<AssetResponseData>, ApiError> {
    state
        .asset_service
        .get_asset(identity.user_id, AssetId(id))
        .await
        .map_err(ApiError::from)
        .map(|ref asset| ApiSuccess::new(StatusCode::OK, asset.into()))
}

/// Asset representation returned by all portfolio endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetResponseData {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub amount: f64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Asset> for AssetResponseData {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.0,
            user_id: asset.owner_id.0,
            name: asset.name.as_str().to_string(),
            amount: asset.amount,
            price: asset.price,
            created_at: asset.created_at,
            updated_at: asset.updated_at,
        }
    }
}

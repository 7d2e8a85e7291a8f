use async_trait::async_trait;

use crate::asset::errors::AssetError;
use crate::asset::errors::PriceError;
use crate::asset::models::Asset;
use crate::asset::models::AssetId;
use crate::asset::models::AssetName;
use crate::asset::models::CreateAssetCommand;
use crate::asset::models::NewAsset;
use crate::asset::models::UpdateAssetCommand;
use crate::domain::user::models::UserId;

/// Port for asset domain service operations.
///
/// Every operation takes the bound identity of the requester; ownership is
/// enforced here, after existence, and nowhere else.
#[async_trait]
pub trait AssetServicePort: Send + Sync + 'static {
    /// Create a new asset owned by the bound identity.
    ///
    /// # Errors
    /// * `OwnerMismatch` - Caller-supplied owner disagrees with the identity
    /// * `PriceLookup` - External price lookup failed
    /// * `DatabaseError` - Database operation failed
    async fn add_asset(
        &self,
        identity: UserId,
        command: CreateAssetCommand,
    ) -> Result<Asset, AssetError>;

    /// Retrieve an asset the identity owns.
    ///
    /// # Errors
    /// * `NotFound` - Asset does not exist (checked before ownership)
    /// * `NotOwner` - Asset belongs to a different identity
    /// * `DatabaseError` - Database operation failed
    async fn get_asset(&self, identity: UserId, id: AssetId) -> Result<Asset, AssetError>;

    /// Update an asset's amount and/or price.
    ///
    /// # Errors
    /// * `NotFound` - Asset does not exist (checked before ownership)
    /// * `NotOwner` - Asset belongs to a different identity
    /// * `NameChangeNotAllowed` - Command attempts to rename the asset
    /// * `DatabaseError` - Database operation failed
    async fn update_asset(
        &self,
        identity: UserId,
        id: AssetId,
        command: UpdateAssetCommand,
    ) -> Result<Asset, AssetError>;

    /// Delete an asset the identity owns.
    ///
    /// # Errors
    /// * `NotFound` - Asset does not exist (checked before ownership)
    /// * `NotOwner` - Asset belongs to a different identity
    /// * `DatabaseError` - Database operation failed
    async fn delete_asset(&self, identity: UserId, id: AssetId) -> Result<(), AssetError>;
}

/// Persistence operations for the asset aggregate.
#[async_trait]
pub trait AssetRepository: Send + Sync + 'static {
    /// Persist a new asset; the store assigns its id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, asset: NewAsset) -> Result<Asset, AssetError>;

    /// Retrieve an asset by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError>;

    /// Update an existing asset's mutable fields.
    ///
    /// # Errors
    /// * `NotFound` - Asset does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, asset: &Asset) -> Result<Asset, AssetError>;

    /// Remove an asset from storage.
    ///
    /// # Errors
    /// * `NotFound` - Asset does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: AssetId) -> Result<(), AssetError>;
}

/// External price feed for assets.
#[async_trait]
pub trait PriceProvider: Send + Sync + 'static {
    /// Current price of the named asset in USD.
    ///
    /// # Errors
    /// * `NotListed` - The feed does not know this asset
    /// * `Request` / `Response` - Transport or decoding failure
    async fn current_price(&self, name: &AssetName) -> Result<f64, PriceError>;
}

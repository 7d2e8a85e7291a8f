use std::sync::Arc;

use async_trait::async_trait;

use crate::asset::errors::AssetError;
use crate::asset::models::Asset;
use crate::asset::models::AssetId;
use crate::asset::models::CreateAssetCommand;
use crate::asset::models::NewAsset;
use crate::asset::models::UpdateAssetCommand;
use crate::asset::ports::AssetRepository;
use crate::asset::ports::AssetServicePort;
use crate::asset::ports::PriceProvider;
use crate::domain::ownership;
use crate::domain::user::models::UserId;

/// Domain service implementation for asset operations.
///
/// Every read or mutation locates the asset first and runs the ownership
/// guard second, so a missing asset is always reported as not-found rather
/// than as a permission denial.
pub struct AssetService<AR, PP>
where
    AR: AssetRepository,
    PP: PriceProvider,
{
    repository: Arc<AR>,
    price_provider: Arc<PP>,
}

impl<AR, PP> AssetService<AR, PP>
where
    AR: AssetRepository,
    PP: PriceProvider,
{
    /// Create a new asset service with injected dependencies.
    pub fn new(repository: Arc<AR>, price_provider: Arc<PP>) -> Self {
        Self {
            repository,
            price_provider,
        }
    }

    /// Locate an asset and enforce ownership, in that order.
    async fn find_owned(&self, identity: UserId, id: AssetId) -> Result<Asset, AssetError> {
        let asset = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AssetError::NotFound(id.0))?;

        if !ownership::authorize(identity, asset.owner_id).is_allowed() {
            return Err(AssetError::NotOwner);
        }

        Ok(asset)
    }
}

#[async_trait]
impl<AR, PP> AssetServicePort for AssetService<AR, PP>
where
    AR: AssetRepository,
    PP: PriceProvider,
{
    async fn add_asset(
        &self,
        identity: UserId,
        command: CreateAssetCommand,
    ) -> Result<Asset, AssetError> {
        // The owner the caller is trying to stamp must be the bound identity,
        // checked before any lookup or persistence.
        if !ownership::authorize(identity, command.claimed_owner).is_allowed() {
            return Err(AssetError::OwnerMismatch);
        }

        let price = self.price_provider.current_price(&command.name).await?;

        self.repository
            .create(NewAsset {
                owner_id: identity,
                name: command.name,
                amount: command.amount,
                price,
            })
            .await
    }

    async fn get_asset(&self, identity: UserId, id: AssetId) -> Result<Asset, AssetError> {
        self.find_owned(identity, id).await
    }

    async fn update_asset(
        &self,
        identity: UserId,
        id: AssetId,
        command: UpdateAssetCommand,
    ) -> Result<Asset, AssetError> {
        let mut asset = self.find_owned(identity, id).await?;

        // Renaming is not permitted; resubmitting the current name (in any
        // casing) is a no-op.
        if let Some(name) = command.name {
            if name.to_lowercase() != asset.name.as_str() {
                return Err(AssetError::NameChangeNotAllowed);
            }
        }

        if let Some(amount) = command.amount {
            asset.amount = amount;
        }
        if let Some(price) = command.price {
            asset.price = price;
        }

        self.repository.update(&asset).await
    }

    async fn delete_asset(&self, identity: UserId, id: AssetId) -> Result<(), AssetError> {
        let asset = self.find_owned(identity, id).await?;
        self.repository.delete(asset.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::asset::errors::PriceError;
    use crate::asset::models::AssetName;

    mock! {
        pub TestAssetRepository {}

        #[async_trait]
        impl AssetRepository for TestAssetRepository {
            async fn create(&self, asset: NewAsset) -> Result<Asset, AssetError>;
            async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError>;
            async fn update(&self, asset: &Asset) -> Result<Asset, AssetError>;
            async fn delete(&self, id: AssetId) -> Result<(), AssetError>;
        }
    }

    mock! {
        pub TestPriceProvider {}

        #[async_trait]
        impl PriceProvider for TestPriceProvider {
            async fn current_price(&self, name: &AssetName) -> Result<f64, PriceError>;
        }
    }

    fn asset_owned_by(owner: UserId) -> Asset {
        Asset {
            id: AssetId(1),
            owner_id: owner,
            name: AssetName::new("bitcoin".to_string()).unwrap(),
            amount: 2.0,
            price: 40_000.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_asset_stamps_owner_and_price() {
        let mut repository = MockTestAssetRepository::new();
        let mut prices = MockTestPriceProvider::new();

        prices
            .expect_current_price()
            .withf(|name| name.as_str() == "bitcoin")
            .times(1)
            .returning(|_| Ok(45_000.0));

        repository
            .expect_create()
            .withf(|new_asset| {
                new_asset.owner_id == UserId(5)
                    && new_asset.name.as_str() == "bitcoin"
                    && new_asset.amount == 1.5
                    && new_asset.price == 45_000.0
            })
            .times(1)
            .returning(|new_asset| {
                Ok(Asset {
                    id: AssetId(1),
                    owner_id: new_asset.owner_id,
                    name: new_asset.name,
                    amount: new_asset.amount,
                    price: new_asset.price,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let command = CreateAssetCommand::new("Bitcoin".to_string(), 1.5, UserId(5)).unwrap();
        let asset = service.add_asset(UserId(5), command).await.unwrap();

        assert_eq!(asset.owner_id, UserId(5));
        assert_eq!(asset.price, 45_000.0);
    }

    #[tokio::test]
    async fn test_add_asset_owner_mismatch_denied_before_any_effect() {
        let mut repository = MockTestAssetRepository::new();
        let mut prices = MockTestPriceProvider::new();

        // Neither the price feed nor the store may be touched.
        prices.expect_current_price().times(0);
        repository.expect_create().times(0);

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let command = CreateAssetCommand::new("bitcoin".to_string(), 1.0, UserId(6)).unwrap();
        let result = service.add_asset(UserId(5), command).await;

        assert!(matches!(result.unwrap_err(), AssetError::OwnerMismatch));
    }

    #[tokio::test]
    async fn test_add_asset_price_lookup_failure() {
        let mut repository = MockTestAssetRepository::new();
        let mut prices = MockTestPriceProvider::new();

        prices
            .expect_current_price()
            .times(1)
            .returning(|name| Err(PriceError::NotListed(name.to_string())));
        repository.expect_create().times(0);

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let command = CreateAssetCommand::new("dogecoin".to_string(), 1.0, UserId(5)).unwrap();
        let result = service.add_asset(UserId(5), command).await;

        assert!(matches!(result.unwrap_err(), AssetError::PriceLookup(_)));
    }

    #[tokio::test]
    async fn test_get_asset_not_found_before_ownership() {
        let mut repository = MockTestAssetRepository::new();
        let prices = MockTestPriceProvider::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        // The caller would not own the asset either way; absence wins.
        let result = service.get_asset(UserId(5), AssetId(99)).await;
        assert!(matches!(result.unwrap_err(), AssetError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_get_asset_denied_for_non_owner() {
        let mut repository = MockTestAssetRepository::new();
        let prices = MockTestPriceProvider::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(asset_owned_by(UserId(6)))));

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let result = service.get_asset(UserId(5), AssetId(1)).await;
        assert!(matches!(result.unwrap_err(), AssetError::NotOwner));
    }

    #[tokio::test]
    async fn test_update_asset_applies_amount_and_price() {
        let mut repository = MockTestAssetRepository::new();
        let prices = MockTestPriceProvider::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(asset_owned_by(UserId(5)))));
        repository
            .expect_update()
            .withf(|asset| asset.amount == 3.0 && asset.price == 41_000.0)
            .times(1)
            .returning(|asset| Ok(asset.clone()));

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let command = UpdateAssetCommand::new(None, Some(3.0), Some(41_000.0)).unwrap();
        let asset = service
            .update_asset(UserId(5), AssetId(1), command)
            .await
            .unwrap();

        assert_eq!(asset.amount, 3.0);
        assert_eq!(asset.price, 41_000.0);
    }

    #[tokio::test]
    async fn test_update_asset_rejects_rename() {
        let mut repository = MockTestAssetRepository::new();
        let prices = MockTestPriceProvider::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(asset_owned_by(UserId(5)))));
        repository.expect_update().times(0);

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let command =
            UpdateAssetCommand::new(Some("ethereum".to_string()), None, None).unwrap();
        let result = service.update_asset(UserId(5), AssetId(1), command).await;

        assert!(matches!(
            result.unwrap_err(),
            AssetError::NameChangeNotAllowed
        ));
    }

    #[tokio::test]
    async fn test_update_asset_same_name_is_noop() {
        let mut repository = MockTestAssetRepository::new();
        let prices = MockTestPriceProvider::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(asset_owned_by(UserId(5)))));
        repository
            .expect_update()
            .times(1)
            .returning(|asset| Ok(asset.clone()));

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let command =
            UpdateAssetCommand::new(Some("bitcoin".to_string()), Some(4.0), None).unwrap();
        let asset = service
            .update_asset(UserId(5), AssetId(1), command)
            .await
            .unwrap();

        assert_eq!(asset.name.as_str(), "bitcoin");
        assert_eq!(asset.amount, 4.0);
    }

    #[tokio::test]
    async fn test_delete_asset_denied_for_non_owner() {
        let mut repository = MockTestAssetRepository::new();
        let prices = MockTestPriceProvider::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(asset_owned_by(UserId(6)))));
        repository.expect_delete().times(0);

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        let result = service.delete_asset(UserId(5), AssetId(1)).await;
        assert!(matches!(result.unwrap_err(), AssetError::NotOwner));
    }

    #[tokio::test]
    async fn test_delete_asset_success() {
        let mut repository = MockTestAssetRepository::new();
        let prices = MockTestPriceProvider::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(asset_owned_by(UserId(5)))));
        repository
            .expect_delete()
            .with(eq(AssetId(1)))
            .times(1)
            .returning(|_| Ok(()));

        let service = AssetService::new(Arc::new(repository), Arc::new(prices));

        assert!(service.delete_asset(UserId(5), AssetId(1)).await.is_ok());
    }
}

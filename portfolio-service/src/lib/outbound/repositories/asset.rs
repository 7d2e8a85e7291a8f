use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::asset::errors::AssetError;
use crate::asset::models::Asset;
use crate::asset::models::AssetId;
use crate::asset::models::AssetName;
use crate::asset::models::NewAsset;
use crate::asset::ports::AssetRepository;
use crate::domain::user::models::UserId;

pub struct PostgresAssetRepository {
    pool: PgPool,
}

impl PostgresAssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AssetRow {
    id: i64,
    user_id: i64,
    name: String,
    amount: f64,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AssetRow {
    fn into_asset(self) -> Result<Asset, AssetError> {
        Ok(Asset {
            id: AssetId(self.id),
            owner_id: UserId(self.user_id),
            name: AssetName::new(self.name)?,
            amount: self.amount,
            price: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl AssetRepository for PostgresAssetRepository {
    async fn create(&self, asset: NewAsset) -> Result<Asset, AssetError> {
        let row = sqlx::query_as::<_, AssetRow>(
            r#"
            INSERT INTO portfolio (user_id, name, amount, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, amount, price, created_at, updated_at
            "#,
        )
        .bind(asset.owner_id.0)
        .bind(asset.name.as_str())
        .bind(asset.amount)
        .bind(asset.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AssetError::DatabaseError(e.to_string()))?;

        row.into_asset()
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError> {
        let row = sqlx::query_as::<_, AssetRow>(
            r#"
            SELECT id, user_id, name, amount, price, created_at, updated_at
            FROM portfolio
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AssetError::DatabaseError(e.to_string()))?;

        row.map(AssetRow::into_asset).transpose()
    }

    async fn update(&self, asset: &Asset) -> Result<Asset, AssetError> {
        let row = sqlx::query_as::<_, AssetRow>(
            r#"
            UPDATE portfolio
            SET amount = $2, price = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, name, amount, price, created_at, updated_at
            "#,
        )
        .bind(asset.id.0)
        .bind(asset.amount)
        .bind(asset.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AssetError::DatabaseError(e.to_string()))?
        .ok_or(AssetError::NotFound(asset.id.0))?;

        row.into_asset()
    }

    async fn delete(&self, id: AssetId) -> Result<(), AssetError> {
        let result = sqlx::query(
            r#"
            DELETE FROM portfolio
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AssetError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AssetError::NotFound(id.0));
        }

        Ok(())
    }
}

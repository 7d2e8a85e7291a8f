use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::asset::errors::AssetError;
use crate::asset::errors::AssetNameError;
use crate::domain::user::models::UserId;

/// Portfolio asset aggregate entity.
///
/// `owner_id` is stamped exactly once at creation from the authenticated
/// identity and is invariant thereafter; updates may touch only `amount` and
/// `price`.
#[derive(Debug, Clone)]
pub struct Asset {
    pub id: AssetId,
    pub owner_id: UserId,
    pub name: AssetName,
    pub amount: f64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Asset unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub i64);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Asset name value type
///
/// Non-empty, stored lowercase. The lowercase form doubles as the lookup key
/// for the external price feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName(String);

impl AssetName {
    /// Create a new valid asset name, lowercasing the input.
    ///
    /// # Errors
    /// * `Empty` - Name is missing or empty
    pub fn new(name: String) -> Result<Self, AssetNameError> {
        if name.is_empty() {
            return Err(AssetNameError::Empty);
        }
        Ok(Self(name.to_lowercase()))
    }

    /// Get the name as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new asset with domain types.
///
/// Carries the owner id the caller is attempting to stamp onto the resource;
/// the service denies creation when it disagrees with the bound identity.
#[derive(Debug)]
pub struct CreateAssetCommand {
    pub name: AssetName,
    pub amount: f64,
    pub claimed_owner: UserId,
}

impl CreateAssetCommand {
    /// Construct a validated creation command.
    ///
    /// # Errors
    /// * `InvalidName` - Name is empty
    /// * `AmountNotPositive` - Amount is zero or negative
    pub fn new(name: String, amount: f64, claimed_owner: UserId) -> Result<Self, AssetError> {
        let name = AssetName::new(name)?;
        if amount <= 0.0 {
            return Err(AssetError::AmountNotPositive(amount));
        }
        Ok(Self {
            name,
            amount,
            claimed_owner,
        })
    }
}

/// Command to update an existing asset.
///
/// Only `amount` and `price` are mutable. `name` is carried so the service
/// can reject an attempt to change it; sending the current name unchanged is
/// a no-op.
#[derive(Debug)]
pub struct UpdateAssetCommand {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub price: Option<f64>,
}

impl UpdateAssetCommand {
    /// Construct a validated update command.
    ///
    /// # Errors
    /// * `AmountNotPositive` - Amount provided but zero or negative
    /// * `NegativePrice` - Price provided but negative
    pub fn new(
        name: Option<String>,
        amount: Option<f64>,
        price: Option<f64>,
    ) -> Result<Self, AssetError> {
        if let Some(amount) = amount {
            if amount <= 0.0 {
                return Err(AssetError::AmountNotPositive(amount));
            }
        }
        if let Some(price) = price {
            if price < 0.0 {
                return Err(AssetError::NegativePrice(price));
            }
        }
        Ok(Self {
            name,
            amount,
            price,
        })
    }
}

/// A fully validated asset ready for persistence, before the store has
/// assigned its id.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub owner_id: UserId,
    pub name: AssetName,
    pub amount: f64,
    pub price: f64,
}

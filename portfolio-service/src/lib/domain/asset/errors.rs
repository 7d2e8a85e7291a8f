use thiserror::Error;

/// Error for AssetName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetNameError {
    #[error("Name is required")]
    Empty,
}

/// Error for external price lookups
#[derive(Debug, Clone, Error)]
pub enum PriceError {
    #[error("Asset not listed by the price feed: {0}")]
    NotListed(String),

    #[error("Price feed request failed: {0}")]
    Request(String),

    #[error("Price feed returned an unreadable response: {0}")]
    Response(String),
}

/// Top-level error for all asset operations
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("Invalid asset name: {0}")]
    InvalidName(#[from] AssetNameError),

    #[error("Amount must be a positive number, got {0}")]
    AmountNotPositive(f64),

    #[error("Price must not be negative, got {0}")]
    NegativePrice(f64),

    #[error("Cannot change the name of the asset")]
    NameChangeNotAllowed,

    #[error("Asset not found: {0}")]
    NotFound(i64),

    #[error("User ID in the payload does not match the authenticated user")]
    OwnerMismatch,

    #[error("You do not have permission to access this asset")]
    NotOwner,

    #[error("Failed to get asset price: {0}")]
    PriceLookup(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<PriceError> for AssetError {
    fn from(err: PriceError) -> Self {
        AssetError::PriceLookup(err.to_string())
    }
}

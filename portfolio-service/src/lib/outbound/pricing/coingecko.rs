use std::collections::HashMap;

use async_trait::async_trait;

use crate::asset::errors::PriceError;
use crate::asset::models::AssetName;
use crate::asset::ports::PriceProvider;

/// Price lookup against the CoinGecko simple-price API.
///
/// The asset's lowercase name doubles as the CoinGecko id. The base URL is
/// injected from configuration so tests can point it at a stub.
pub struct CoinGeckoPriceProvider {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoPriceProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoPriceProvider {
    async fn current_price(&self, name: &AssetName) -> Result<f64, PriceError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd",
            self.base_url,
            name.as_str()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PriceError::Request(e.to_string()))?;

        let body: HashMap<String, HashMap<String, f64>> = response
            .json()
            .await
            .map_err(|e| PriceError::Response(e.to_string()))?;

        body.get(name.as_str())
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .ok_or_else(|| PriceError::NotListed(name.as_str().to_string()))
    }
}

use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SecretConfig;
use chrono::Utc;
use portfolio_service::asset::errors::AssetError;
use portfolio_service::asset::errors::PriceError;
use portfolio_service::asset::models::Asset;
use portfolio_service::asset::models::AssetId;
use portfolio_service::asset::models::AssetName;
use portfolio_service::asset::models::NewAsset;
use portfolio_service::asset::ports::AssetRepository;
use portfolio_service::asset::ports::AssetServicePort;
use portfolio_service::asset::ports::PriceProvider;
use portfolio_service::asset::service::AssetService;
use portfolio_service::domain::user::models::User;
use portfolio_service::domain::user::models::UserId;
use portfolio_service::domain::user::models::Username;
use portfolio_service::domain::user::service::UserService;
use portfolio_service::inbound::http::router::create_router;
use portfolio_service::user::errors::UserError;
use portfolio_service::user::ports::UserRepository;
use portfolio_service::user::ports::UserServicePort;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secret_config =
            SecretConfig::new(TEST_SECRET, 30).expect("Failed to build secret config");
        let authenticator = Arc::new(Authenticator::new(&secret_config));

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(user_repo));

        let asset_repo = Arc::new(InMemoryAssetRepository::new());
        let prices = Arc::new(StubPriceProvider::with_known_assets());
        let asset_service: Arc<dyn AssetServicePort> =
            Arc::new(AssetService::new(asset_repo, prices));

        let router = create_router(user_service, asset_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and log them in, returning `(token, user_id)`.
    pub async fn register_and_login(&self, username: &str, password: &str) -> (String, i64) {
        let response = self
            .post("/register")
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to execute register request");
        assert!(response.status().is_success(), "registration failed");

        let response = self
            .post("/login")
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to execute login request");
        assert!(response.status().is_success(), "login failed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["user_id"].as_i64().unwrap(),
        )
    }

    /// A correctly signed token whose expiry has already passed.
    pub fn expired_token_for(&self, user_id: i64, username: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": user_id,
            "username": username,
            "iat": now - 3600,
            "exp": now - 1800,
        });

        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("Failed to encode expired token")
    }
}

/// In-memory identity store for integration tests.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, username: &Username, password_hash: &str) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.username == *username) {
            return Err(UserError::UsernameAlreadyExists(
                username.as_str().to_string(),
            ));
        }

        let user = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            username: username.clone(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == *username).cloned())
    }
}

/// In-memory asset store for integration tests.
pub struct InMemoryAssetRepository {
    assets: Mutex<Vec<Asset>>,
    next_id: AtomicI64,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self {
            assets: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn create(&self, new_asset: NewAsset) -> Result<Asset, AssetError> {
        let mut assets = self.assets.lock().unwrap();

        let asset = Asset {
            id: AssetId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            owner_id: new_asset.owner_id,
            name: new_asset.name,
            amount: new_asset.amount,
            price: new_asset.price,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assets.push(asset.clone());

        Ok(asset)
    }

    async fn find_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError> {
        let assets = self.assets.lock().unwrap();
        Ok(assets.iter().find(|a| a.id == id).cloned())
    }

    async fn update(&self, asset: &Asset) -> Result<Asset, AssetError> {
        let mut assets = self.assets.lock().unwrap();

        let stored = assets
            .iter_mut()
            .find(|a| a.id == asset.id)
            .ok_or(AssetError::NotFound(asset.id.0))?;

        stored.amount = asset.amount;
        stored.price = asset.price;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: AssetId) -> Result<(), AssetError> {
        let mut assets = self.assets.lock().unwrap();

        let before = assets.len();
        assets.retain(|a| a.id != id);

        if assets.len() == before {
            return Err(AssetError::NotFound(id.0));
        }

        Ok(())
    }
}

/// Fixed-price feed standing in for the external lookup.
pub struct StubPriceProvider {
    quotes: HashMap<String, f64>,
}

impl StubPriceProvider {
    pub fn with_known_assets() -> Self {
        let mut quotes = HashMap::new();
        quotes.insert("bitcoin".to_string(), 45_000.0);
        quotes.insert("ethereum".to_string(), 2_500.0);
        Self { quotes }
    }
}

#[async_trait]
impl PriceProvider for StubPriceProvider {
    async fn current_price(&self, name: &AssetName) -> Result<f64, PriceError> {
        self.quotes
            .get(name.as_str())
            .copied()
            .ok_or_else(|| PriceError::NotListed(name.as_str().to_string()))
    }
}

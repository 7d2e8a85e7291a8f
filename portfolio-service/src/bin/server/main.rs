use std::sync::Arc;

use auth::Authenticator;
use auth::SecretConfig;
use portfolio_service::asset::ports::AssetServicePort;
use portfolio_service::asset::service::AssetService;
use portfolio_service::config::Config;
use portfolio_service::domain::user::service::UserService;
use portfolio_service::inbound::http::router::create_router;
use portfolio_service::outbound::pricing::coingecko::CoinGeckoPriceProvider;
use portfolio_service::outbound::repositories::asset::PostgresAssetRepository;
use portfolio_service::outbound::repositories::user::PostgresUserRepository;
use portfolio_service::user::ports::UserServicePort;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "portfolio-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        pricing_base_url = %config.pricing.base_url,
        "Configuration loaded"
    );

    // A missing or empty signing secret is fatal to the process.
    let secret_config = SecretConfig::new(config.jwt.secret, config.jwt.expiration_minutes)?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(&secret_config));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(user_repository));

    let asset_repository = Arc::new(PostgresAssetRepository::new(pg_pool));
    let price_provider = Arc::new(CoinGeckoPriceProvider::new(config.pricing.base_url));
    let asset_service: Arc<dyn AssetServicePort> =
        Arc::new(AssetService::new(asset_repository, price_provider));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(user_service, asset_service, authenticator);
    axum::serve(http_listener, application).await?;

    Ok(())
}

use std::sync::Arc;

use site_api::{
    adapters::{
        repositories::{
            InMemoryTokenRepository, PgNewsRepository, PgStatusRepository, RedisTokenRepository,
        },
        router::create_router,
        state::{AppState, CronSecret, SiteSettings},
    },
    application::{
        repositories::{
            news_repository::NewsRepository, status_repository::StatusRepository,
            token_repository::TokenRepository,
        },
        services::{
            spawn_status_refresher, spawn_sweeper, CrmClient, SystemClock, SystemStatusCache,
            TokenService,
        },
    },
    domain::{config::app::AppConfig, models::system_status::SystemStatus},
    services::HttpCrmClient,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().expect("ERROR: invalid configuration");

    tracing::info!(
        "Starting site-api (locales: {:?}, token ttl: {:?})",
        config.supported_locales,
        config.token_ttl
    );

    // Configure CORS
    let cors = match &config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<_> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    };

    // Connect to PostgreSQL and, when configured, Redis in parallel
    tracing::info!("Connecting to backing stores...");
    let (pool, redis_conn_manager) = tokio::join!(
        async {
            sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(&config.database_url)
                .await
                .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.")
        },
        async {
            match &config.redis_url {
                Some(redis_url) => {
                    let redis_client = redis::Client::open(redis_url.as_str())
                        .expect("ERROR: Failed to create Redis client. Check REDIS_URL format.");
                    Some(
                        redis::aio::ConnectionManager::new(redis_client)
                            .await
                            .expect("ERROR: Failed to connect to Redis. Check REDIS_URL and network connectivity."),
                    )
                }
                None => None,
            }
        }
    );
    tracing::info!("Backing store connections established");

    let token_repo = match redis_conn_manager {
        Some(conn) => {
            tracing::info!("Using Redis token store");
            Arc::new(RedisTokenRepository::new(conn)) as Arc<dyn TokenRepository>
        }
        None => {
            tracing::warn!("REDIS_URL not set, using in-memory token store (single instance only)");
            Arc::new(InMemoryTokenRepository::new()) as Arc<dyn TokenRepository>
        }
    };

    let token_service = TokenService::new(token_repo, Arc::new(SystemClock), config.token_ttl);
    let status_repo = Arc::new(PgStatusRepository::new(pool.clone())) as Arc<dyn StatusRepository>;
    let status_cache =
        SystemStatusCache::new(SystemStatus::with_phone_number(&config.default_phone_number));

    if let Err(e) = status_cache.refresh(status_repo.as_ref()).await {
        tracing::warn!("Initial system status load failed, serving defaults: {}", e);
    }

    let crm_client = HttpCrmClient::new(&config.crm_base_url, config.crm_api_key.clone())
        .expect("ERROR: Failed to create CRM client");

    let _sweeper = spawn_sweeper(token_service.clone(), config.sweep_interval);
    let _refresher = config
        .status_refresh_interval
        .map(|every| spawn_status_refresher(status_cache.clone(), status_repo.clone(), every));

    let app_state = AppState {
        token_service,
        status_cache,
        status_repository: status_repo,
        news_repository: Arc::new(PgNewsRepository::new(pool)) as Arc<dyn NewsRepository>,
        crm_client: Arc::new(crm_client) as Arc<dyn CrmClient>,
        site: SiteSettings::new(config.supported_locales.clone(), config.default_locale.clone()),
        cron_secret: CronSecret(config.cron_secret.as_str().into()),
    };

    let router = create_router(app_state, cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}

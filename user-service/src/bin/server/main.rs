use std::sync::Arc;

use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::auth::service::AuthService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::PostgresUserRepository;
use user_service::outbound::token_store::RedisTokenStore;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        redis_url = %config.redis.url,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        "Configuration loaded"
    );

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

    let token_store = Arc::new(RedisTokenStore::connect(&config.redis.url).await?);
    tracing::info!(store = "redis", "Revocation store connected");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_store,
        config.jwt.secret.as_bytes(),
        Duration::minutes(config.jwt.access_ttl_minutes),
        Duration::days(config.jwt.refresh_ttl_days),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    Ok(())
}

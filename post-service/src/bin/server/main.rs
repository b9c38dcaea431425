use std::sync::Arc;
use std::time::Duration;

use post_service::config::Config;
use post_service::domain::comment::service::CommentService;
use post_service::domain::post::service::PostService;
use post_service::inbound::http::router::create_router;
use post_service::outbound::auth::HttpTokenValidator;
use post_service::outbound::cache::RedisCacheStore;
use post_service::outbound::repositories::PostgresCommentRepository;
use post_service::outbound::repositories::PostgresLikeRepository;
use post_service::outbound::repositories::PostgresPostRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "post-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        auth_service = %config.auth_service.base_url,
        cache_ttl_seconds = config.redis.cache_ttl_seconds,
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

    let cache = Arc::new(RedisCacheStore::connect(&config.redis.url).await?);
    tracing::info!(store = "redis", "Read cache connected");

    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool.clone()));
    let comment_repository = Arc::new(PostgresCommentRepository::new(pg_pool.clone()));
    let like_repository = Arc::new(PostgresLikeRepository::new(pg_pool));

    let post_service = Arc::new(PostService::new(
        post_repository.clone(),
        like_repository,
        cache,
        config.redis.cache_ttl_seconds,
    ));
    let comment_service = Arc::new(CommentService::new(comment_repository, post_repository));

    let token_validator = Arc::new(HttpTokenValidator::new(
        config.auth_service.base_url.clone(),
        Duration::from_secs(config.auth_service.timeout_seconds),
    )?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(
        http_listener,
        create_router(
            post_service,
            comment_service,
            token_validator,
            config.pagination,
        ),
    )
    .await?;

    Ok(())
}

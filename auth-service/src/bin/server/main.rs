use std::sync::Arc;

use auth::Argon2Hasher;
use auth::TokenIssuer;
use auth_service::config::Config;
use auth_service::credential::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_lifetime_minutes = config.jwt.expiration_minutes,
        argon2_memory_kib = config.hashing.memory_kib,
        argon2_iterations = config.hashing.iterations,
        "Configuration loaded"
    );

    // Signing must be available before any request is accepted.
    let token_issuer = Arc::new(
        TokenIssuer::with_lifetime(config.jwt.secret.as_bytes(), config.jwt.lifetime())
            .map_err(|e| {
                tracing::error!(error = %e, "Token signing is not configured");
                e
            })?,
    );

    let password_hasher = Arc::new(Argon2Hasher::with_params(
        config.hashing.memory_kib,
        config.hashing.iterations,
        config.hashing.parallelism,
    )?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let auth_service = Arc::new(AuthService::new(
        credential_store,
        password_hasher,
        token_issuer,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

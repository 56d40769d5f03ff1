use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenService;
use carpool_service::config::Config;
use carpool_service::domain::identity::ports::AuthServicePort;
use carpool_service::domain::identity::ports::WelcomeNotifier;
use carpool_service::domain::identity::service::AuthService;
use carpool_service::inbound::http::router::create_router;
use carpool_service::outbound::notifications::LoggingNotifier;
use carpool_service::outbound::notifications::ResendNotifier;
use carpool_service::outbound::repositories::PostgresCredentialRepository;
use carpool_service::outbound::repositories::PostgresProfileRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carpool_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "carpool-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_lifetime = %config.jwt.expires_in,
        notifier = if config.notifier.resend_api_key.is_some() { "resend" } else { "logging" },
        "Configuration loaded"
    );

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

    let password_hasher = Arc::new(PasswordHasher::new(config.hashing_params())?);
    let tokens = Arc::new(TokenService::from_config(&config.token_config()));

    let auth_service: Arc<dyn AuthServicePort> = match ResendNotifier::from_config(&config.notifier)? {
        Some(notifier) => build_service(&pg_pool, notifier, &password_hasher, &tokens),
        None => build_service(&pg_pool, LoggingNotifier, &password_hasher, &tokens),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, tokens);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

fn build_service<N: WelcomeNotifier>(
    pool: &PgPool,
    notifier: N,
    password_hasher: &Arc<PasswordHasher>,
    tokens: &Arc<TokenService>,
) -> Arc<dyn AuthServicePort> {
    Arc::new(AuthService::new(
        Arc::new(PostgresCredentialRepository::new(pool.clone())),
        Arc::new(PostgresProfileRepository::new(pool.clone())),
        Arc::new(notifier),
        Arc::clone(password_hasher),
        Arc::clone(tokens),
    ))
}

use std::sync::Arc;

use auth::Authenticator;
use auth::HashCost;
use sqlx::postgres::PgPoolOptions;
use team_service::account::service::AccountService;
use team_service::config::Config;
use team_service::inbound::http::router::create_router;
use team_service::outbound::identity::GoogleIdentityProvider;
use team_service::outbound::repositories::PostgresAccountRepository;
use team_service::outbound::repositories::PostgresRosterRepository;
use team_service::team::service::TeamService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "team_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "team-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        store_timeout_secs = config.database.timeout_secs,
        session_hours = config.jwt.expiration_hours,
        federated_login = config.google.is_some(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_settings(
        config.jwt.secret.as_bytes(),
        HashCost::from(&config.password),
        chrono::Duration::hours(config.jwt.expiration_hours),
    )?);

    let identity_provider = match config.google.clone() {
        Some(google) => Some(Arc::new(GoogleIdentityProvider::from_config(google)?)),
        None => {
            tracing::warn!("Google client not configured, federated login disabled");
            None
        }
    };

    let store_timeout = config.database.timeout();
    let account_repository = Arc::new(PostgresAccountRepository::new(
        pg_pool.clone(),
        store_timeout,
    ));
    let roster_repository = Arc::new(PostgresRosterRepository::new(pg_pool, store_timeout));

    let account_service = Arc::new(AccountService::new(
        account_repository,
        identity_provider,
        authenticator,
    ));
    let team_service = Arc::new(TeamService::new(roster_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, team_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}

use std::sync::Arc;

use anyhow::Context;
use auth::PasswordHasher;
use auth::TokenIssuer;
use user_api::config::Config;
use user_api::domain::user::ports::UserRepository;
use user_api::domain::user::service::UserService;
use user_api::domain::user::tokens::TokenService;
use user_api::inbound::http::middleware::rate_limiter;
use user_api::inbound::http::router::create_router;
use user_api::inbound::http::router::AppState;
use user_api::logging;
use user_api::outbound::database::Database;
use user_api::repositories::InMemoryUserRepository;
use user_api::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load().context("Failed to load configuration")?;
    logging::init(&config).context("Failed to initialise logging")?;

    tracing::info!(
        service = "user-api",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        environment = %config.environment,
        port = config.port,
        database_name = %config.database_name,
        uses_database = config.uses_database(),
        jwt_expiry_hours = config.jwt_expiry_hours,
        rate_limit_rpm = config.rate_limit_rpm,
        bcrypt_cost = config.bcrypt_cost,
        "Configuration loaded"
    );

    // JWT_EXPIRY_HOURS narrows the access window; refresh tokens keep 168 hours
    let issuer = Arc::new(
        TokenIssuer::new(config.jwt_secret.as_bytes()).with_access_ttl(config.access_token_ttl()),
    );
    tracing::info!(
        access_ttl_hours = issuer.access_ttl().num_hours(),
        refresh_ttl_hours = issuer.refresh_ttl().num_hours(),
        "Token issuer ready"
    );

    let database = if config.uses_database() {
        let database = Database::connect(&config)
            .await
            .context("Failed to connect to database")?;
        database.migrate().await.context("Failed to run migrations")?;
        Some(database)
    } else {
        tracing::warn!("DATABASE_URL not set, users are kept in memory and lost on exit");
        None
    };

    let state = match &database {
        Some(database) => build_state(
            Arc::new(PostgresUserRepository::new(database.pool())),
            issuer,
            &config,
        ),
        None => build_state(Arc::new(InMemoryUserRepository::new()), issuer, &config),
    };

    let http_address = format!("0.0.0.0:{}", config.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {}", http_address))?;
    tracing::info!(
        address = %http_address,
        port = config.port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Http server error")?;

    if let Some(database) = database {
        database.close().await;
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

fn build_state<UR>(repository: Arc<UR>, issuer: Arc<TokenIssuer>, config: &Config) -> AppState
where
    UR: UserRepository,
{
    let password_hasher = PasswordHasher::new(config.bcrypt_cost);

    AppState {
        user_service: Arc::new(UserService::new(repository.clone(), password_hasher)),
        token_service: Arc::new(TokenService::new(repository, issuer)),
        rate_limiter: rate_limiter(config.rate_limit_rpm),
        expose_error_details: config.expose_error_details(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}

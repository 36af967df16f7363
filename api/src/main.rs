use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{error, info, warn};

use blog_api::app::create_app;
use blog_api::routes::auth::AppState;
use blog_api::telemetry::init_tracing;
use blog_core::repositories::{TokenRepository, UserRepository};
use blog_core::services::auth::{AuthService, AuthServiceConfig};
use blog_core::services::token::{
    TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};
use blog_infra::database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
use blog_infra::memory::{InMemoryTokenRepository, InMemoryUserRepository};
use blog_shared::config::{AppConfig, Environment, LoggingConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(&LoggingConfig::from_env(Environment::from_env()))?;

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "failed to load configuration");
        e
    })?;
    config.validate().map_err(|e| {
        error!(error = %e, "refusing to start");
        e
    })?;

    info!(
        environment = %config.environment,
        backend = ?config.server.store_backend,
        "starting Simple Blog auth API"
    );

    match config.server.store_backend {
        StoreBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("cannot reach the database")?;
            pool.migrate().await.context("cannot apply the database schema")?;

            let users = Arc::new(MySqlUserRepository::new(pool.pool().clone()));
            let tokens = Arc::new(MySqlTokenRepository::new(pool.pool().clone()));
            let result = run(config, users, tokens).await;

            pool.close().await;
            result
        }
        StoreBackend::Memory => {
            warn!("using in-memory stores; accounts and sessions are lost on restart");
            let users = Arc::new(InMemoryUserRepository::new());
            let tokens = Arc::new(InMemoryTokenRepository::new());
            run(config, users, tokens).await
        }
    }
}

/// Wire services over the chosen stores and serve until shutdown
async fn run<U, T>(config: AppConfig, users: Arc<U>, tokens: Arc<T>) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let token_service = Arc::new(TokenService::new(
        tokens.clone(),
        TokenServiceConfig::from(&config.auth),
    ));
    let auth_service = AuthService::new(users, token_service, AuthServiceConfig::from(&config.auth))
        .await
        .context("cannot initialise the authentication service")?;

    let cleanup = Arc::new(TokenCleanupService::new(
        tokens,
        TokenCleanupConfig::from(&config.cleanup),
    ));
    let cleanup_task = cleanup.start_background_task();

    let state = web::Data::new(AppState::new(Arc::new(auth_service)));
    let cors = config.cors.clone();
    let environment = config.environment;
    let bind_address = config.server.bind_address();

    info!(address = %bind_address, workers = config.server.workers, "listening");

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, environment));
    // 0 keeps actix's default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("cannot bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    info!("server stopped");
    Ok(())
}

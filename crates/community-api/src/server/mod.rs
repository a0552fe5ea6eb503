//! Server setup and initialization
//!
//! Wires PostgreSQL repositories and the Redis notifier into the services
//! and runs the Axum server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use community_cache::{Publisher, RedisMembershipNotifier, RedisPool};
use community_common::{AppConfig, AppError, JwtService};
use community_core::SnowflakeGenerator;
use community_db::{
    create_pool, run_migrations, PgMembershipRepository, PgPointLedgerRepository,
    PgReportRepository, PgUserRepository, PoolConfig,
};
use community_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit, cors_layer};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let router = api
        .merge(health_routes())
        .layer(cors_layer(&config.cors, config.app.env.is_production()));
    let router = apply_middleware(
        router,
        Duration::from_secs(config.api.request_timeout_secs),
    );

    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Database migrations applied");
    }

    let redis_pool = RedisPool::connect(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    let notifier = Arc::new(RedisMembershipNotifier::new(Publisher::new(redis_pool)));

    let service_context = ServiceContextBuilder::new()
        .membership_repo(Arc::new(PgMembershipRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .point_repo(Arc::new(PgPointLedgerRepository::new(pool.clone())))
        .report_repo(Arc::new(PgReportRepository::new(pool)))
        .notifier(notifier)
        .jwt_service(Arc::new(JwtService::from_config(&config.jwt)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application on an already-bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Server(format!("failed to bind {addr}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
